//! Raw API call command.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::Value;

use vibes_http::{ApiRequest, Method, RequestBody, RequestOptions};

use crate::output;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::Get,
            HttpMethod::Post => Method::Post,
            HttpMethod::Put => Method::Put,
            HttpMethod::Delete => Method::Delete,
        }
    }
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method
    #[arg(value_enum)]
    pub method: HttpMethod,

    /// Path relative to the API URL (e.g., /users/me)
    pub path: String,

    /// JSON request body (use - for stdin)
    #[arg(long)]
    pub data: Option<String>,

    /// Extra header as NAME:VALUE (repeatable)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,
}

pub async fn run(api_url: &str, args: RequestArgs) -> Result<()> {
    let client = super::connect(api_url).await?;

    let body = match args.data.as_deref() {
        Some(data) => RequestBody::Json(read_json(data)?),
        None => RequestBody::Empty,
    };

    let mut options = RequestOptions::new();
    for header in &args.headers {
        let (name, value) = header
            .split_once(':')
            .with_context(|| format!("Header must be NAME:VALUE, got '{}'", header))?;
        options = options
            .header(name.trim(), value.trim())
            .context("Invalid header")?;
    }

    let request = ApiRequest::new(args.method.into(), &args.path)
        .body(body)
        .options(options);
    let response: Value = client.request(request).await.context("Request failed")?;

    output::json_pretty(&response)
}

fn read_json(data: &str) -> Result<Value> {
    if data == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        serde_json::from_str(&buf).context("Invalid JSON from stdin")
    } else {
        serde_json::from_str(data).context("Invalid JSON in --data")
    }
}
