pub mod formatter;

pub use formatter::{
    format_header, format_pull_request, format_pull_requests, format_requested_review,
    format_status, should_use_colors, FormatOptions,
};
