pub mod challenge;
pub mod credentials;
pub mod portal;
pub mod proxy;
pub mod wrapper;


pub use challenge::UnauthorizedResource;
pub use credentials::{Anonymous, CredentialFactory, Credentials};
pub use portal::{AvatarInterface, AvatarSession, LoginOutcome, Logout, Mind, Portal};
pub use proxy::ResourceWrapper;
pub use wrapper::HttpAuthSessionWrapper;
