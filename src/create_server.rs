use crate::{
    bytes, case, hex,
    error::{Error, ErrorKind},
    hex_escape, percent, radix, rot13, Logger, Server,
};
use hyper::{
    header::{HeaderValue, CONTENT_TYPE},
    Body, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use std::{collections::HashMap, str::FromStr, sync::Arc};

macro_rules! unwrap {
    ( $x:expr ) => {{
        match $x {
            Ok(result) => result,
            Err(error) => return respond_error(Error::from(error)),
        }
    }};
}

// Room for the JSON framing and escapes around the text fields.
const BODY_OVERHEAD: usize = 4096;

pub struct State {
    max_input_length: usize,
}

impl State {
    pub fn new(max_input_length: usize) -> Self {
        Self { max_input_length }
    }

    /// Largest request body worth reading: every allowed character at four
    /// utf8 bytes, plus the JSON around it.
    pub fn body_limit(&self) -> usize {
        self.max_input_length.saturating_mul(4).saturating_add(BODY_OVERHEAD)
    }

    fn check_length(&self, text: &str) -> Result<(), Error> {
        let length = text.chars().count();
        if length > self.max_input_length {
            return Err(Error::new(
                ErrorKind::Request,
                format!("Input of {} characters exceeds the limit of {}", length, self.max_input_length),
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct TextBody {
    text: String,
}

#[derive(Deserialize)]
struct EscapeBody {
    text: String,
    charset: String,
}

#[derive(Deserialize)]
struct FormatBody {
    template: String,
    components: Vec<String>,
}

#[derive(Deserialize)]
struct HexBody {
    hex: String,
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|error| Error::new(ErrorKind::Request, format!("Invalid JSON body: {}", error)))
}

fn parse_parameter<T: FromStr>(parameters: &HashMap<String, String>, name: &str) -> Result<T, Error> {
    let value = parameters
        .get(name)
        .ok_or_else(|| Error::new(ErrorKind::Request, format!("Missing {} parameter", name)))?;
    value
        .parse()
        .map_err(|_| Error::new(ErrorKind::Request, format!(r#"Invalid {} parameter "{}""#, name, value)))
}

fn respond(status: StatusCode, value: serde_json::Value) -> Response<Body> {
    let mut response = Response::new(Body::from(value.to_string()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

fn respond_value(value: impl Serialize) -> Response<Body> {
    respond(StatusCode::OK, json!({ "value": value }))
}

fn respond_error(error: Error) -> Response<Body> {
    respond(
        StatusCode::BAD_REQUEST,
        json!({"kind": error.kind().name(), "message": error.message()}),
    )
}

pub fn create_server(state: Arc<State>, logger: Logger) -> Result<Server<State>, regex::Error> {
    let mut server = Server::new(state.clone(), logger);
    server.limit_body(state.body_limit());

    server.get("/radix/{value}", |_request, parameters, _body, state| async move {
        let value = unwrap!(parse_parameter::<String>(&parameters, "value"));
        unwrap!(state.check_length(&value));
        let from: u32 = unwrap!(parse_parameter(&parameters, "from"));
        let to: u32 = unwrap!(parse_parameter(&parameters, "to"));
        respond_value(unwrap!(radix::convert(&value, from, to)))
    })?;

    server.post("/percent/encode", |_request, _parameters, body, state| async move {
        let body: TextBody = unwrap!(parse_body(&body));
        unwrap!(state.check_length(&body.text));
        respond_value(percent::encode(&body.text))
    })?;

    server.post("/percent/decode", |_request, _parameters, body, state| async move {
        let body: TextBody = unwrap!(parse_body(&body));
        unwrap!(state.check_length(&body.text));
        respond_value(unwrap!(percent::decode(&body.text)))
    })?;

    server.post("/percent/format", |_request, _parameters, body, state| async move {
        let body: FormatBody = unwrap!(parse_body(&body));
        unwrap!(state.check_length(&body.template));
        for component in &body.components {
            unwrap!(state.check_length(component));
        }
        respond_value(unwrap!(percent::format(&body.template, &body.components)))
    })?;

    server.post("/hex/escape", |_request, _parameters, body, state| async move {
        let body: EscapeBody = unwrap!(parse_body(&body));
        unwrap!(state.check_length(&body.text));
        let charset: Vec<char> = body.charset.chars().collect();
        respond_value(hex_escape::escape(&body.text, &charset))
    })?;

    server.post("/hex/unescape", |_request, _parameters, body, state| async move {
        let body: EscapeBody = unwrap!(parse_body(&body));
        unwrap!(state.check_length(&body.text));
        let charset: Vec<char> = body.charset.chars().collect();
        respond_value(unwrap!(hex_escape::unescape(&body.text, &charset)))
    })?;

    server.post("/rot13", |_request, _parameters, body, state| async move {
        let body: TextBody = unwrap!(parse_body(&body));
        unwrap!(state.check_length(&body.text));
        respond_value(rot13::rot13(&body.text))
    })?;

    server.post("/case/{operation}", |_request, parameters, body, state| async move {
        let body: TextBody = unwrap!(parse_body(&body));
        unwrap!(state.check_length(&body.text));
        let operation = unwrap!(parse_parameter::<String>(&parameters, "operation"));
        let value = match operation.as_str() {
            "lower" => case::first_char_to_lower(&body.text),
            "upper" => case::first_char_to_upper(&body.text),
            "toggle" => case::toggle_first_char(&body.text),
            _ => {
                let message = format!(r#"Unknown case operation "{}""#, operation);
                return respond_error(Error::new(ErrorKind::Request, message));
            }
        };
        respond_value(value)
    })?;

    server.get("/bytes/double/{value}", |_request, parameters, _body, _state| async move {
        let value: f64 = unwrap!(parse_parameter(&parameters, "value"));
        respond(StatusCode::OK, json!({ "hex": hex::encode(bytes::double_to_bytes(value)) }))
    })?;

    server.get("/bytes/long/{value}", |_request, parameters, _body, _state| async move {
        let value: i64 = unwrap!(parse_parameter(&parameters, "value"));
        respond(StatusCode::OK, json!({ "hex": hex::encode(bytes::long_to_bytes(value)) }))
    })?;

    server.post("/bytes/decode", |_request, _parameters, body, state| async move {
        let body: HexBody = unwrap!(parse_body(&body));
        unwrap!(state.check_length(&body.hex));
        let decoded = unwrap!(hex::decode(&body.hex).map_err(|error| Error::new(ErrorKind::Request, error.to_string())));
        respond_value(bytes::from_bytes(Some(decoded.as_slice())))
    })?;

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::{create_server, State};
    use crate::{Logger, Server};
    use hyper::{Body, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn server() -> Server<State> {
        create_server(Arc::new(State::new(64)), Logger::new(false)).unwrap()
    }

    fn call(server: &Server<State>, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
            let body = if body.is_null() { Vec::new() } else { body.to_string().into_bytes() };
            let response = server.respond(request, body).await;
            let status = response.status();
            let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
            let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, value)
        })
    }

    #[test]
    fn radix() {
        let server = server();
        assert_eq!(
            call(&server, Method::GET, "/radix/255?from=10&to=16", Value::Null),
            (StatusCode::OK, json!({"value": "ff"}))
        );
        let (status, value) = call(&server, Method::GET, "/radix/zz%20z?from=62&to=10", Value::Null);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["kind"], "InvalidDigit");
        let (status, value) = call(&server, Method::GET, "/radix/1?from=0&to=10", Value::Null);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["kind"], "InvalidBase");
        let (_, value) = call(&server, Method::GET, "/radix/1?to=10", Value::Null);
        assert_eq!(value["message"], "Missing from parameter");
    }

    #[test]
    fn percent() {
        let server = server();
        assert_eq!(
            call(&server, Method::POST, "/percent/encode", json!({"text": "a b"})),
            (StatusCode::OK, json!({"value": "a%20b"}))
        );
        assert_eq!(
            call(&server, Method::POST, "/percent/decode", json!({"text": "a+b%21"})),
            (StatusCode::OK, json!({"value": "a b!"}))
        );
        let (_, value) = call(&server, Method::POST, "/percent/decode", json!({"text": ""}));
        assert_eq!(value["kind"], "AbsentInput");
        assert_eq!(
            call(&server, Method::POST, "/percent/format", json!({"template": "/q/{0}", "components": ["x/y"]})),
            (StatusCode::OK, json!({"value": "/q/x%2fy"}))
        );
    }

    #[test]
    fn hex_escape() {
        let server = server();
        assert_eq!(
            call(&server, Method::POST, "/hex/escape", json!({"text": "a|b", "charset": "|"})),
            (StatusCode::OK, json!({"value": "a%7cb"}))
        );
        assert_eq!(
            call(&server, Method::POST, "/hex/unescape", json!({"text": "a%7cb", "charset": "|"})),
            (StatusCode::OK, json!({"value": "a|b"}))
        );
    }

    #[test]
    fn case_and_rot13() {
        let server = server();
        assert_eq!(
            call(&server, Method::POST, "/case/toggle", json!({"text": "Hello"})),
            (StatusCode::OK, json!({"value": "hello"}))
        );
        assert_eq!(
            call(&server, Method::POST, "/case/lower", json!({"text": "hello"})),
            (StatusCode::OK, json!({"value": null}))
        );
        assert_eq!(call(&server, Method::POST, "/case/sideways", json!({"text": "x"})).0, StatusCode::BAD_REQUEST);
        assert_eq!(
            call(&server, Method::POST, "/rot13", json!({"text": "Hello"})),
            (StatusCode::OK, json!({"value": "Uryyb"}))
        );
    }

    #[test]
    fn bytes() {
        let server = server();
        assert_eq!(
            call(&server, Method::GET, "/bytes/double/1e21", Value::Null),
            (StatusCode::OK, json!({"hex": "31303030303030303030303030303030303030303030"}))
        );
        assert_eq!(
            call(&server, Method::GET, "/bytes/long/-12", Value::Null),
            (StatusCode::OK, json!({"hex": "2d3132"}))
        );
        assert_eq!(
            call(&server, Method::POST, "/bytes/decode", json!({"hex": "c3a9"})),
            (StatusCode::OK, json!({"value": "é"}))
        );
    }

    #[test]
    fn body_limit() {
        assert_eq!(State::new(64).body_limit(), 64 * 4 + 4096);
        assert_eq!(State::new(usize::MAX).body_limit(), usize::MAX);
    }

    #[test]
    fn limits_and_routing() {
        let server = server();
        let (status, value) = call(&server, Method::POST, "/rot13", json!({"text": "x".repeat(65)}));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["kind"], "Request");
        assert_eq!(call(&server, Method::GET, "/nowhere", Value::Null).0, StatusCode::NOT_FOUND);
        assert_eq!(call(&server, Method::POST, "/rot13", json!([1])).0, StatusCode::BAD_REQUEST);
    }
}
