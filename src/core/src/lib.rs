/* src/core/src/lib.rs */

pub mod errors;
pub mod escape;
pub mod page;
pub mod props;
pub mod request;
pub mod resolve;
pub mod response;

// Re-exports for ergonomic use
pub use errors::InertiaError;
pub use escape::script_safe_json;
pub use page::{InlinePage, Page};
pub use props::{Envelope, PropFn, PropValue, Props, Respondable, SerializeProp};
pub use request::{
  PageRequest, X_INERTIA, X_INERTIA_INLINE, X_INERTIA_PARTIAL_COMPONENT, X_INERTIA_PARTIAL_DATA,
};
pub use resolve::{DirectInvoker, Invoker, resolve_props, resolve_value};
pub use response::{Rendered, Response};
