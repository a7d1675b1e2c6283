//! HTTP transport types and the single point of contact with ureq.
//!
//! # Design
//! Requests are described as plain data first (`HttpRequest`), then mapped
//! onto ureq calls by [`execute`]. This keeps every wrapper testable without
//! a network: unit tests assert on the built `HttpRequest`, integration
//! tests exercise `execute` against the mock server. The agent is created
//! with `http_status_as_error(false)` so 4xx/5xx responses come back as data
//! and the response envelope can still be parsed; everything else (timeouts,
//! redirects, TLS) stays at ureq's defaults.

use uuid::Uuid;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// Body of a write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` key/value pairs. May be empty —
    /// an empty form is still a body, distinct from no body at all.
    Form(Vec<(String, String)>),
    /// `multipart/form-data` with a single file part under the fixed field
    /// name `filename`.
    Multipart { file_name: String, content: Vec<u8> },
}

/// An HTTP request described as plain data.
///
/// Query pairs are kept unencoded; percent-encoding happens inside ureq when
/// the request is executed.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// An HTTP response reduced to what the client needs: status and body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Build an agent that reports non-2xx statuses as data, not errors.
pub(crate) fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

/// Execute one request. Exactly one round trip, no retries.
pub(crate) fn execute(
    agent: &ureq::Agent,
    req: &HttpRequest,
) -> Result<HttpResponse, ureq::Error> {
    log::debug!("{:?} {}", req.method, req.url);

    let query = req.query.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let headers = req.headers.iter();

    let mut response = match (req.method, &req.body) {
        (HttpMethod::Get, _) => {
            let mut b = agent.get(&req.url).query_pairs(query);
            for (name, value) in headers {
                b = b.header(name, value);
            }
            b.call()?
        }
        (HttpMethod::Delete, None) => {
            let mut b = agent.delete(&req.url).query_pairs(query);
            for (name, value) in headers {
                b = b.header(name, value);
            }
            b.call()?
        }
        (HttpMethod::Delete, Some(body)) => {
            let mut b = agent.delete(&req.url).query_pairs(query);
            for (name, value) in headers {
                b = b.header(name, value);
            }
            send_body(b.force_send_body(), body)?
        }
        (HttpMethod::Post, None) => {
            let mut b = agent.post(&req.url).query_pairs(query);
            for (name, value) in headers {
                b = b.header(name, value);
            }
            b.send_empty()?
        }
        (HttpMethod::Post, Some(body)) => {
            let mut b = agent.post(&req.url).query_pairs(query);
            for (name, value) in headers {
                b = b.header(name, value);
            }
            send_body(b, body)?
        }
        (HttpMethod::Patch, None) => {
            let mut b = agent.patch(&req.url).query_pairs(query);
            for (name, value) in headers {
                b = b.header(name, value);
            }
            b.send_empty()?
        }
        (HttpMethod::Patch, Some(body)) => {
            let mut b = agent.patch(&req.url).query_pairs(query);
            for (name, value) in headers {
                b = b.header(name, value);
            }
            send_body(b, body)?
        }
    };

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;

    Ok(HttpResponse { status, body })
}

fn send_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: &RequestBody,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        RequestBody::Form(pairs) => {
            builder.send_form(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        }
        RequestBody::Multipart { file_name, content } => {
            let boundary = Uuid::new_v4().simple().to_string();
            let payload = multipart_payload(&boundary, file_name, content);
            builder
                .content_type(format!("multipart/form-data; boundary={boundary}"))
                .send(&payload[..])
        }
    }
}

/// Assemble a single-part `multipart/form-data` body. The file is attached
/// under the field name `filename`, matching the upload endpoint's contract.
fn multipart_payload(boundary: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(content.len() + 256);
    payload.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    payload.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"filename\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    payload.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    payload.extend_from_slice(content);
    payload.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    payload
}
