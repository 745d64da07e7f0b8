//! Assertions for RFC 7807 error bodies returned by the backend.
//!
//! Kept independent of backend types so the contract is checked from the
//! outside, the way an API client sees it.

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Parse a problem body and check it against the response headers.
///
/// Panics unless the body is valid problem JSON, `x-trace-id` equals the body
/// `trace_id`, and `type` ends with the error code.
pub fn parse_problem(headers: &HeaderMap, body: &[u8]) -> ProblemDetailsLike {
    let problem: ProblemDetailsLike =
        serde_json::from_slice(body).expect("body should be problem details JSON");

    let header_trace = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id should be ASCII");
    assert_eq!(problem.trace_id, header_trace, "trace id parity");
    assert!(
        problem.type_.ends_with(&problem.code),
        "type '{}' should end with code '{}'",
        problem.type_,
        problem.code
    );

    problem
}

/// Assert status, code and (optionally) a detail fragment.
pub fn assert_problem_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(status, expected_status);
    let problem = parse_problem(headers, body);
    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    if let Some(fragment) = detail_contains {
        assert!(
            problem.detail.contains(fragment),
            "expected detail to contain '{fragment}', got '{}'",
            problem.detail
        );
    }
    problem
}

pub async fn assert_problem_response<B>(
    resp: ServiceResponse<B>,
    expected_code: &str,
    expected_status: StatusCode,
    detail_contains: Option<&str>,
) -> ProblemDetailsLike
where
    B: MessageBody + 'static,
{
    let resp: ServiceResponse<BoxBody> = resp.map_into_boxed_body();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    assert_problem_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_status,
        detail_contains,
    )
}
