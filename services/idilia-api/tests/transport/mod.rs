//! Client round trips against a local mock server.

use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use http::{HeaderMap, Method};
use idilia_api::{
    ApiError, Client, FormRequest, MultipartMessage, MultipartPart, MultipartRequest, Outcome,
    Payload, RequestSigner, SigningContext, StaticCredentialProvider, TransportFailure,
};
use idilia_core::{Context, ErrorKind, Signer};
use idilia_http_send_reqwest::ReqwestHttpSend;
use mockito::Matcher;
use pretty_assertions::assert_eq;

const TIMESTAMP: &str = "Tue, 01 Jan 2013 00:00:00 GMT";

fn client(endpoint: &str) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();

    let time = Utc.with_ymd_and_hms(2013, 1, 1, 0, 0, 0).unwrap();
    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::persistent(Duration::from_secs(5)).unwrap());
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::new("access", "secret"),
        RequestSigner::new().with_time(time),
    );

    Client::new(signer, endpoint).unwrap()
}

fn authorization(path: &str, content_digest: &str) -> String {
    let ctx = SigningContext {
        timestamp: TIMESTAMP.to_string(),
        host: "127.0.0.1".to_string(),
        path: path.to_string(),
        content_digest: content_digest.to_string(),
    };
    format!("IDILIA access:{}", ctx.signature("secret"))
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn test_form_request_is_signed_and_gzip_decoded() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/1/text/match.json")
        .match_header("accept-encoding", "gzip")
        .match_header(
            "content-type",
            "application/x-www-form-urlencoded; charset=UTF-8",
        )
        .match_header("date", TIMESTAMP)
        .match_header("host", "127.0.0.1")
        .match_header(
            "authorization",
            authorization("/1/text/match.json", "XUFAKrxLKna5cZ2REBfFkg==").as_str(),
        )
        .match_body("requestId=mytest&text=hello")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("content-encoding", "gzip")
        .with_body(gzip(br#"{"requestId":"mytest","matches":[]}"#))
        .create();

    let req = FormRequest::new("/1/text/match.json")
        .param("requestId", "mytest")
        .signed_param("text", "hello");
    let payload = client(&server.url()).call(req).unwrap();

    mock.assert();
    assert_eq!(payload.request_id().as_deref(), Some("mytest"));
    assert_eq!(payload.as_json().unwrap()["matches"], serde_json::json!([]));
}

#[test]
fn test_sequential_requests_on_one_client() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/1/kb/query.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"requestId":"mytest"}"#)
        .expect(3)
        .create();

    let client = client(&server.url());
    for query in ["Montreal", "kiss", "chair"] {
        let req = FormRequest::new("/1/kb/query.json")
            .signed_param("query", format!(r#"[{{"lemma":"{query}"}}]"#));
        client.call(req).unwrap();
    }

    mock.assert();
}

#[test]
fn test_multipart_request_and_response() {
    let mut server = mockito::Server::new();

    let expected_body = MultipartMessage::default()
        .with_part(
            MultipartPart::new("requestId=mytest&resultMime=application%2Fx-semdoc%2Bxml%2Bgz")
                .with_header(
                    "Content-Type",
                    "application/x-www-form-urlencoded; charset=UTF-8",
                ),
        )
        .with_part(
            MultipartPart::new("JFK was shot in Dallas.")
                .with_header("Content-Type", "text/plain; charset=UTF-8"),
        )
        .encode();

    let response = MultipartMessage::new("RESPONSE-BOUNDARY")
        .with_part(
            MultipartPart::new("<response><requestId>mytest</requestId></response>")
                .with_header("Content-Type", "text/xml"),
        )
        .with_part(
            MultipartPart::new(gzip(br#"<semdoc><fs sk="JFK/N1"/><fs sk="Dallas/N1"/></semdoc>"#))
                .with_header("Content-Type", "application/x-semdoc+xml+gz"),
        );

    let mock = server
        .mock("POST", "/1/text/disambiguate.mpxml")
        .match_header(
            "content-type",
            "multipart/mixed; boundary=--------YmM9XyV7I10ncTJJSzZD",
        )
        .match_header(
            "authorization",
            authorization("/1/text/disambiguate.mpxml", "ByH7CA3pZcKvc/hZvmBZRw==").as_str(),
        )
        .match_body(String::from_utf8(expected_body.to_vec()).unwrap().as_str())
        .with_status(200)
        .with_header("content-type", &response.content_type())
        .with_body(response.encode())
        .create();

    let req = MultipartRequest::new("/1/text/disambiguate.mpxml")
        .param("requestId", "mytest")
        .param("resultMime", "application/x-semdoc+xml+gz")
        .text("JFK was shot in Dallas.");
    let payload = client(&server.url()).call(req).unwrap();

    mock.assert();
    assert_eq!(payload.request_id().as_deref(), Some("mytest"));

    let part = &payload.parts()[0];
    let semdoc = Payload::parse(part.content_type(), &part.gunzip().unwrap()).unwrap();
    let senses: Vec<_> = semdoc
        .as_xml()
        .unwrap()
        .descendants("fs")
        .into_iter()
        .filter_map(|e| e.attr("sk"))
        .collect();
    assert_eq!(senses, vec!["JFK/N1", "Dallas/N1"]);
}

#[test]
fn test_forwarded_part_is_signed_by_payload() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/1/kb/tagging_menu.json")
        .match_header(
            "authorization",
            authorization("/1/kb/tagging_menu.json", "XUFAKrxLKna5cZ2REBfFkg==").as_str(),
        )
        .match_body(Matcher::Regex("X-Tf-Version: 2".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"text":"<p>tide</p>","menu":"<ul/>"}"#)
        .create();

    let part = MultipartPart::new("hello")
        .with_header("Content-Type", "application/x-tf+xml+gz")
        .with_header("X-Tf-Version", "2");
    let req = MultipartRequest::new("/1/kb/tagging_menu.json")
        .param("filters", "noDynamic")
        .part(part);
    let payload = client(&server.url()).call(req).unwrap();

    mock.assert();
    assert_eq!(payload.as_json().unwrap()["menu"], "<ul/>");
}

#[test]
fn test_http_error_is_transport_failure() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/1/text/match.json")
        .with_status(500)
        .with_body("internal error")
        .create();

    let req = FormRequest::new("/1/text/match.json").signed_param("text", "hello");
    let err = client(&server.url()).call(req).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportFailed);
    let detail = err.source_ref::<TransportFailure>().unwrap();
    assert_eq!(detail.status.as_u16(), 500);
    assert_eq!(detail.body.as_ref(), b"internal error");
}

#[test]
fn test_proxy_error_page_is_transport_failure() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/1/text/match.json")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_header("content-encoding", "gzip")
        .with_body("<html>Bad Gateway</html>")
        .create();

    let req = FormRequest::new("/1/text/match.json").signed_param("text", "hello");
    let err = client(&server.url()).call(req).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportFailed);
    let detail = err.source_ref::<TransportFailure>().unwrap();
    assert_eq!(detail.status.as_u16(), 502);
    assert_eq!(detail.body.as_ref(), b"<html>Bad Gateway</html>");
}

#[test]
fn test_error_msg_in_200_is_api_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/1/text/match.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"requestId":"mytest","status":401,"errorMsg":"Invalid signature"}"#)
        .create();

    let client = client(&server.url());
    let req = FormRequest::new("/1/text/match.json").signed_param("text", "hello");

    let resp = client.execute(req.clone()).unwrap();
    assert_eq!(
        idilia_api::validate::inspect(&resp).unwrap(),
        Outcome::Failure(ApiError {
            message: "Invalid signature".to_string(),
            status: "401".to_string(),
        })
    );

    let err = client.call(req).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ApiFailed);
}

#[test]
fn test_unsigned_send_adds_accept_encoding() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/")
        .match_header("accept-encoding", "gzip")
        .with_status(404)
        .create();

    let resp = client(&server.url())
        .send(Method::GET, "/", HeaderMap::new(), bytes::Bytes::new())
        .unwrap();

    mock.assert();
    assert_eq!(resp.status().as_u16(), 404);
}

#[test]
fn test_refused_connection_is_transport_failure() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let req = FormRequest::new("/1/text/match.json").signed_param("text", "hello");
    let err = client(&format!("http://127.0.0.1:{port}"))
        .call(req)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportFailed);
    assert!(err.source_ref::<TransportFailure>().is_none());
}
