//! op-adapters: colaboradores concretos y operaciones de un dominio "posts".
//!
//! Este crate provee:
//! - `Post` y `User` (recurso y usuario que ve el motor).
//! - `PostPolicy`, `PostContract` y `PostDecorator`, las tres capacidades.
//! - `PostStore`, almacenamiento en memoria.
//! - Las operaciones `Ping`, `Create`, `Index`, `Show` y `Update`, y
//!   `PostsApp`, que las arma con su configuración y las despacha por nombre.

pub mod app;
pub mod contract;
pub mod decorator;
pub mod model;
pub mod operations;
pub mod policy;
pub mod store;

pub use app::{ApiVersion, PostsApp};
pub use contract::PostContract;
pub use decorator::PostDecorator;
pub use model::{Post, User};
pub use policy::PostPolicy;
pub use store::PostStore;
