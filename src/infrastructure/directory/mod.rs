//! Directory infrastructure - upstream member lookup over HTTP

mod http;

pub use http::HttpMemberDirectory;
