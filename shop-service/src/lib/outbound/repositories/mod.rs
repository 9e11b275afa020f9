pub mod cart;
pub mod product;
pub mod user;

pub use cart::PostgresCartRepository;
pub use product::PostgresProductRepository;
pub use user::PostgresUserRepository;
