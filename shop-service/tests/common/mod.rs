#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::SigningSecret;
use auth::TokenService;
use serde_json::json;
use serde_json::Value;
use shop_service::domain::cart::errors::CartError;
use shop_service::domain::cart::models::Cart;
use shop_service::domain::cart::models::CartLine;
use shop_service::domain::cart::models::LineQuantity;
use shop_service::domain::cart::ports::CartRepository;
use shop_service::domain::cart::service::CartService;
use shop_service::domain::product::errors::ProductError;
use shop_service::domain::product::models::Product;
use shop_service::domain::product::models::ProductId;
use shop_service::domain::product::models::ProductSlug;
use shop_service::domain::product::ports::ProductRepository;
use shop_service::domain::product::service::ProductService;
use shop_service::domain::user::errors::UserError;
use shop_service::domain::user::models::User;
use shop_service::domain::user::models::UserId;
use shop_service::domain::user::models::Username;
use shop_service::domain::user::ports::UserRepository;
use shop_service::domain::user::service::UserService;
use shop_service::inbound::http::router::create_router;
use shop_service::inbound::http::router::AppState;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub token_service: TokenService,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::default());
        let product_repository = Arc::new(InMemoryProductRepository::default());
        let cart_repository = Arc::new(InMemoryCartRepository::new(Arc::clone(
            &product_repository,
        )));

        let state = AppState {
            user_service: Arc::new(UserService::new(user_repository)),
            product_service: Arc::new(ProductService::new(Arc::clone(&product_repository))),
            cart_service: Arc::new(CartService::new(cart_repository, product_repository)),
            authenticator: Arc::new(Authenticator::new(test_token_service())),
        };

        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            token_service: test_token_service(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and sign in, returning `(user_id, token)`
    pub async fn register_and_sign_in(&self, username: &str, password: &str) -> (String, String) {
        let response = self
            .post("/auth/register")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        let user_id = body["data"]["id"].as_str().unwrap().to_string();

        let response = self
            .post("/auth/signin")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        let token = body["data"]["token"].as_str().unwrap().to_string();

        (user_id, token)
    }

    /// Create a product through the API and return its JSON representation
    pub async fn create_product(&self, token: &str, slug: &str, price: i64, quantity: i32) -> Value {
        let response = self
            .post_authenticated("/products", token)
            .json(&json!({
                "name": slug.replace('-', " "),
                "slug": slug,
                "price": price,
                "quantity": quantity,
                "category": "essential-oil"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}

fn test_token_service() -> TokenService {
    TokenService::new(SigningSecret::new(TEST_SECRET))
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| &u.username == username).cloned())
    }

    async fn find_identity(&self, id: &UserId) -> Result<Option<UserId>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(id).map(|u| u.id))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let users = self.users.lock().unwrap();
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    fn get(&self, id: &ProductId) -> Option<Product> {
        self.products.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        let mut products = self.products.lock().unwrap();
        if products.values().any(|p| p.slug == product.slug) {
            return Err(ProductError::SlugAlreadyExists(product.slug.to_string()));
        }
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        Ok(self.get(id))
    }

    async fn find_by_slug(&self, slug: &ProductSlug) -> Result<Option<Product>, ProductError> {
        let products = self.products.lock().unwrap();
        Ok(products.values().find(|p| &p.slug == slug).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let products = self.products.lock().unwrap();
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let mut products = self.products.lock().unwrap();
        match products.get_mut(&product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(product)
            }
            None => Err(ProductError::NotFound(product.id.to_string())),
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        Ok(self.products.lock().unwrap().remove(id))
    }

    async fn delete_all(&self) -> Result<u64, ProductError> {
        let mut products = self.products.lock().unwrap();
        let count = products.len() as u64;
        products.clear();
        Ok(count)
    }
}

/// Cart lines in insertion order, joined against the product store on read.
pub struct InMemoryCartRepository {
    products: Arc<InMemoryProductRepository>,
    lines: Mutex<Vec<(UserId, ProductId, LineQuantity)>>,
}

impl InMemoryCartRepository {
    pub fn new(products: Arc<InMemoryProductRepository>) -> Self {
        Self {
            products,
            lines: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find_cart(&self, user_id: &UserId) -> Result<Cart, CartError> {
        let lines = self.lines.lock().unwrap();
        let lines = lines
            .iter()
            .filter(|(owner, _, _)| owner == user_id)
            .filter_map(|(_, product_id, quantity)| {
                self.products.get(product_id).map(|product| CartLine {
                    product_id: product.id,
                    slug: product.slug,
                    name: product.name,
                    unit_price: product.price,
                    quantity: *quantity,
                })
            })
            .collect();

        Ok(Cart {
            user_id: *user_id,
            lines,
        })
    }

    async fn upsert_line(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: LineQuantity,
    ) -> Result<(), CartError> {
        if self.products.get(product_id).is_none() {
            return Err(CartError::ProductNotFound(product_id.to_string()));
        }

        let mut lines = self.lines.lock().unwrap();
        match lines
            .iter_mut()
            .find(|(owner, product, _)| owner == user_id && product == product_id)
        {
            Some(line) => line.2 = quantity,
            None => lines.push((*user_id, *product_id, quantity)),
        }
        Ok(())
    }

    async fn remove_line(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, CartError> {
        let mut lines = self.lines.lock().unwrap();
        let before = lines.len();
        lines.retain(|(owner, product, _)| !(owner == user_id && product == product_id));
        Ok(lines.len() < before)
    }

    async fn clear(&self, user_id: &UserId) -> Result<u64, CartError> {
        let mut lines = self.lines.lock().unwrap();
        let before = lines.len();
        lines.retain(|(owner, _, _)| owner != user_id);
        Ok((before - lines.len()) as u64)
    }
}
