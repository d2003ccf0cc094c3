//! 테스트용 가짜 경매 백엔드 (axum)

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const ADMIN_EMAIL: &str = "admin@igreja.org";
pub const ADMIN_PASSWORD: &str = "segredo";
pub const TOKEN: &str = "token-de-teste";

/// 백엔드 상태
#[derive(Default)]
pub struct Backend {
    /// item id -> (lance_inicial, 입찰 금액 목록)
    items: Mutex<HashMap<i64, (f64, Vec<f64>)>>,
    pub bid_posts: AtomicUsize,
    pub last_query: Mutex<Option<HashMap<String, String>>>,
    /// 참이면 /me가 500으로 응답
    pub me_unavailable: AtomicBool,
}

impl Backend {
    pub fn lance_atual(&self, id: i64) -> Option<f64> {
        let items = self.items.lock().unwrap();
        items
            .get(&id)
            .map(|(inicial, lances)| lances.last().copied().unwrap_or(*inicial))
    }

    pub fn add_item(&self, id: i64, lance_inicial: f64) {
        self.items
            .lock()
            .unwrap()
            .insert(id, (lance_inicial, Vec::new()));
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub backend: Arc<Backend>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// 서버 기동 (item 1: 50.00)
pub async fn spawn() -> TestServer {
    let backend = Arc::new(Backend::default());
    backend.add_item(1, 50.0);

    let app = Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/itens", get(list_items))
        .route("/itens/:id", get(get_item))
        .route("/lances", get(list_bids).post(create_bid))
        .route("/lances/exportar", get(export_bids))
        .route("/configuracoes", get(configuration))
        .route("/dashboard", get(dashboard))
        .route("/campanhas/:id", get(get_campaign))
        .route("/categorias/:id", axum::routing::delete(delete_category))
        .with_state(Arc::clone(&backend));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });

    TestServer { addr, backend }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Token não fornecido!"})),
    )
        .into_response()
}

fn item_json(id: i64, inicial: f64, lances: &[f64]) -> Value {
    let atual = lances.last().copied().unwrap_or(inicial);
    let ultimos: Vec<Value> = lances
        .iter()
        .rev()
        .take(3)
        .map(|v| json!({"valor": v, "data": "2025-03-01T19:30:00.000001"}))
        .collect();
    json!({
        "id": id,
        "nome": format!("Item {id}"),
        "lance_inicial": inicial,
        "banner_16_9": null,
        "banner_1_1": null,
        "campanha": {"id": 1, "nome": "Missões 2025"},
        "categoria": {"id": 2, "nome": "Artesanato"},
        "lance_atual": atual,
        "ultimos_lances": ultimos
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == ADMIN_EMAIL && body["senha"] == ADMIN_PASSWORD {
        Json(json!({
            "token": TOKEN,
            "user": {"id": 1, "nome": "Admin", "email": ADMIN_EMAIL, "permissao": "admin"}
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Credenciais inválidas!"})),
        )
            .into_response()
    }
}

async fn me(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    if backend.me_unavailable.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Erro no banco de dados"})),
        )
            .into_response();
    }
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"user": {"id": 1, "email": ADMIN_EMAIL, "permissao": "admin"}})).into_response()
}

async fn list_items(State(backend): State<Arc<Backend>>) -> Json<Value> {
    let items = backend.items.lock().unwrap();
    let mut list: Vec<Value> = items
        .iter()
        .map(|(id, (inicial, lances))| {
            let mut v = item_json(*id, *inicial, lances);
            v.as_object_mut().unwrap().remove("ultimos_lances");
            v
        })
        .collect();
    list.sort_by_key(|v| -v["id"].as_i64().unwrap());
    Json(Value::Array(list))
}

async fn get_item(State(backend): State<Arc<Backend>>, Path(id): Path<i64>) -> Response {
    let items = backend.items.lock().unwrap();
    match items.get(&id) {
        Some((inicial, lances)) => Json(item_json(id, *inicial, lances)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Item não encontrado!"})),
        )
            .into_response(),
    }
}

async fn create_bid(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    backend.bid_posts.fetch_add(1, Ordering::SeqCst);
    let id = body["item_id"].as_i64().unwrap_or_default();
    let valor = body["valor"].as_f64().unwrap_or_default();

    let mut items = backend.items.lock().unwrap();
    let Some((inicial, lances)) = items.get_mut(&id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Item não encontrado!"})),
        )
            .into_response();
    };
    let atual = lances.last().copied().unwrap_or(*inicial);
    if valor <= atual {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": format!("O lance deve ser maior que o lance atual de R$ {atual:.2}"),
                "lance_atual": atual
            })),
        )
            .into_response();
    }
    lances.push(valor);
    let bid_id = lances.len();
    (
        StatusCode::CREATED,
        Json(json!({"message": "Lance registrado com sucesso!", "id": bid_id})),
    )
        .into_response()
}

async fn list_bids(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    *backend.last_query.lock().unwrap() = Some(query);
    Json(json!([{
        "id": 1,
        "valor": 51.0,
        "nome_participante": "Maria",
        "telefone": "(11) 98765-4321",
        "data_lance": "2025-03-01T19:30:00",
        "item": {"id": 1, "nome": "Item 1"},
        "categoria": {"id": 2, "nome": "Artesanato"}
    }]))
    .into_response()
}

async fn export_bids(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    "ID,Item,Categoria,Valor,Participante,Telefone,Data\n".into_response()
}

async fn configuration() -> Json<Value> {
    Json(json!({
        "nome_instituicao": "Igreja",
        "logo": null,
        "telefone": null,
        "email": null,
        "moeda": "R$",
        "mensagem_home": "Bem-vindo ao Leilão Missionário!"
    }))
}

async fn dashboard(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "campanhas_ativas": 1,
        "total_itens": 1,
        "total_lances": 0,
        "valor_arrecadado": 0.0,
        "ultimos_lances": []
    }))
    .into_response()
}

async fn get_campaign(Path(id): Path<i64>) -> Response {
    match id {
        1 => Json(json!({"id": 1, "nome": "Missões 2025", "ano": 2025, "status": "ativa", "banner": null}))
            .into_response(),
        // JSON이 아닌 오류 본문
        500 => (StatusCode::INTERNAL_SERVER_ERROR, "internal failure").into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Campanha não encontrada!"})),
        )
            .into_response(),
    }
}

async fn delete_category(headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"message": format!("Categoria {id} deletada com sucesso!")})).into_response()
}
