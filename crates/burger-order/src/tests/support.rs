//! Shared fixtures and the scripted transport for flow tests.

use burger_api::{
    ApiClient, ApiRequest, ApiResult, HttpTransport, Ingredient, IngredientKind, RawResponse,
};
use burger_storage::{CredentialStore, MemoryStorage};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted transport: replies with queued responses in order and records
/// every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, body: Value) {
        self.responses.lock().unwrap().push_back(RawResponse {
            ok: true,
            body: body.to_string(),
        });
    }

    pub fn push_failure(&self, message: Option<&str>) {
        let body = match message {
            Some(m) => json!({ "success": false, "message": m }),
            None => json!({ "success": false }),
        };
        self.responses.lock().unwrap().push_back(RawResponse {
            ok: false,
            body: body.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request: response queue is empty"))
    }
}

pub fn create_client() -> (Arc<ApiClient>, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::new());
    let credentials = Arc::new(CredentialStore::new(Box::new(MemoryStorage::new())));
    let client = Arc::new(ApiClient::with_transport(
        "https://norma.nomoreparties.space/api",
        credentials,
        transport.clone(),
    ));
    (client, transport)
}

pub fn ingredient(id: &str, kind: IngredientKind, price: u64) -> Ingredient {
    Ingredient {
        id: id.to_string(),
        name: format!("Ingredient {id}"),
        kind,
        proteins: 10,
        fat: 10,
        carbohydrates: 10,
        calories: 100,
        price,
        image: String::new(),
        image_mobile: String::new(),
        image_large: String::new(),
    }
}

pub fn bun(price: u64) -> Ingredient {
    ingredient("bun-1", IngredientKind::Bun, price)
}

pub fn filling(id: &str, price: u64) -> Ingredient {
    ingredient(id, IngredientKind::Main, price)
}

pub fn ingredient_body(id: &str, kind: &str, price: u64) -> Value {
    json!({
        "_id": id,
        "name": format!("Ingredient {id}"),
        "type": kind,
        "proteins": 10, "fat": 10, "carbohydrates": 10, "calories": 100,
        "price": price,
        "image": "", "image_mobile": "", "image_large": ""
    })
}

pub fn order_body(number: u64) -> Value {
    json!({
        "_id": format!("o-{number}"),
        "ingredients": ["bun-1", "a", "bun-1"],
        "status": "done",
        "name": "Space burger",
        "createdAt": "2024-06-01T10:00:00.000Z",
        "updatedAt": "2024-06-01T10:00:05.000Z",
        "number": number
    })
}
