//! HTTP protocol layer module
//!
//! Response construction shared by every handler path.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_500_response, build_error_response,
    build_html_response, build_json_response, build_options_response, build_plain_response,
};
