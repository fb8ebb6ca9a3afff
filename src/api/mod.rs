pub mod actions;
pub mod headers;
pub mod pages;
pub mod time;

pub use actions::{handle_submit_message, MessageForm, __path_handle_submit_message};
pub use pages::{
    handle_isr, handle_rsc, handle_server_actions, handle_ssg, handle_ssr, RENDER_CACHE_HEADER,
    __path_handle_isr, __path_handle_rsc, __path_handle_server_actions, __path_handle_ssg,
    __path_handle_ssr,
};
pub use time::{handle_time, __path_handle_time};
