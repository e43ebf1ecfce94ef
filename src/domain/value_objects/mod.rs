//! Domain Value Objects - Immutable values that describe characteristics
//!
//! Value objects have no identity and are compared by their values.
//! They are immutable and can be freely shared.

pub mod app_type;
pub mod rect;
pub mod switch_id;
pub mod window_handle;

pub use app_type::AppType;
pub use rect::Rect;
pub use switch_id::SwitchId;
pub use window_handle::WindowHandle;
