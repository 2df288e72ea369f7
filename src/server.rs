use crate::{percent, Logger};
use hyper::{
    body::HttpBody,
    service::{make_service_fn, service_fn},
    Body, Method, Request, Response, StatusCode,
};
use regex::Regex;
use std::{collections::HashMap, convert::Infallible, future::Future, net::SocketAddr, pin::Pin, sync::Arc};

/// A path template such as `/radix/{value}`. Each `{name}` matches one path
/// segment.
pub struct DynamicUri {
    regex: Regex,
    parameters: HashMap<String, usize>,
}

impl DynamicUri {
    pub fn new(uri: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(r"\{([^\{]*)\}")?;
        let mut offset = 0;
        let mut index = 1;
        let mut chunks = Vec::new();
        let mut parameters = HashMap::new();
        for occurence in regex.find_iter(uri) {
            let range = occurence.range();
            let name = &uri[range.start + 1..range.end - 1];
            parameters.insert(name.to_string(), index);
            chunks.push(regex::escape(&uri[offset..range.start]));
            chunks.push("([^/]*)".to_string());
            offset = range.end;
            index += 1;
        }
        chunks.push(regex::escape(&uri[offset..]));
        let regex = Regex::new(&format!("^{}$", chunks.join("")))?;
        Ok(Self { regex, parameters })
    }

    pub fn check(&self, uri: &str) -> Option<HashMap<String, String>> {
        let captures = self.regex.captures(uri)?;
        let mut parameters = HashMap::new();
        for (name, &index) in &self.parameters {
            parameters.insert(name.clone(), captures[index].to_string());
        }
        Some(parameters)
    }
}

/// Path and query values are percent-decoded, `+` reading as a space.
fn decode_parameter(value: &str) -> Result<String, percent::Error> {
    if value.is_empty() {
        return Ok(String::new());
    }
    percent::decode(value)
}

fn parse_parameters(raw: HashMap<String, String>, query: Option<&str>) -> Result<HashMap<String, String>, percent::Error> {
    let mut parameters = HashMap::new();
    for (name, value) in raw {
        parameters.insert(name, decode_parameter(&value)?);
    }
    if let Some(query) = query {
        for part in query.split('&') {
            if let Some((name, value)) = part.split_once('=') {
                parameters.insert(decode_parameter(name)?, decode_parameter(value)?);
            }
        }
    }
    Ok(parameters)
}

fn respond_text(status: StatusCode, text: String) -> Response<Body> {
    let mut response = Response::new(Body::from(text));
    *response.status_mut() = status;
    response
}

type BoxedResponseFuture = Pin<Box<dyn Send + Future<Output = Response<Body>>>>;
type BoxedHandler<S> = Box<dyn Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> BoxedResponseFuture + Send + Sync>;

struct Route<S> {
    method: Method,
    dynamic_uri: DynamicUri,
    handler: BoxedHandler<S>,
}

impl<S> Route<S> {
    fn new(method: Method, uri: &str, handler: BoxedHandler<S>) -> Result<Self, regex::Error> {
        Ok(Self {
            method,
            dynamic_uri: DynamicUri::new(uri)?,
            handler,
        })
    }

    pub fn check(&self, request: &Request<Body>) -> Option<HashMap<String, String>> {
        if request.method() == self.method {
            self.dynamic_uri.check(request.uri().path())
        } else {
            None
        }
    }
}

pub struct Router<S> {
    routes: Vec<Route<S>>,
    state: Arc<S>,
    logger: Logger,
}

impl<S> Router<S> {
    pub fn new(state: Arc<S>, logger: Logger) -> Self {
        Self {
            routes: Vec::new(),
            state,
            logger,
        }
    }

    pub fn add<H, F>(&mut self, method: Method, uri: &str, handler: H) -> Result<(), regex::Error>
    where
        H: 'static + Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.routes.push(Route::new(
            method,
            uri,
            Box::new(move |request, parameters, body, state| Box::pin(handler(request, parameters, body, state))),
        )?);
        Ok(())
    }

    pub async fn route(&self, request: Request<Body>, body: Vec<u8>) -> Response<Body> {
        self.logger.log(format!("{} {}", request.method(), request.uri()));
        for route in &self.routes {
            if let Some(parameters) = route.check(&request) {
                let parameters = match parse_parameters(parameters, request.uri().query()) {
                    Ok(parameters) => parameters,
                    Err(error) => return respond_text(StatusCode::BAD_REQUEST, error.to_string()),
                };
                return (route.handler)(request, parameters, body, self.state.clone()).await;
            }
        }
        respond_text(StatusCode::NOT_FOUND, "Not Found".to_string())
    }
}

/// Reads the whole body, refusing with `413` once more than `limit` bytes
/// have arrived.
async fn read_body(request: &mut Request<Body>, limit: usize) -> Result<Vec<u8>, Response<Body>> {
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = request.body_mut().data().await {
        let chunk = chunk.map_err(|error| respond_text(StatusCode::BAD_REQUEST, error.to_string()))?;
        if body.len() + chunk.len() > limit {
            let message = format!("Body exceeds the limit of {} bytes", limit);
            return Err(respond_text(StatusCode::PAYLOAD_TOO_LARGE, message));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

pub struct Server<S> {
    router: Router<S>,
    body_limit: usize,
}

impl<S: 'static + Send + Sync> Server<S> {
    pub fn new(state: Arc<S>, logger: Logger) -> Self {
        Self {
            router: Router::new(state, logger),
            body_limit: usize::MAX,
        }
    }

    pub fn limit_body(&mut self, limit: usize) {
        self.body_limit = limit;
    }

    pub fn get<H, F>(&mut self, uri: &str, handler: H) -> Result<(), regex::Error>
    where
        H: 'static + Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.add(Method::GET, uri, handler)
    }

    pub fn post<H, F>(&mut self, uri: &str, handler: H) -> Result<(), regex::Error>
    where
        H: 'static + Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.add(Method::POST, uri, handler)
    }

    /// Routes one request whose body has already been read.
    pub async fn respond(&self, request: Request<Body>, body: Vec<u8>) -> Response<Body> {
        self.router.route(request, body).await
    }

    pub async fn run(self, address: SocketAddr) -> Result<(), hyper::Error> {
        let logger = self.router.logger;
        let body_limit = self.body_limit;
        let router = Arc::new(self.router);
        let make_service = make_service_fn(move |_| {
            let router = router.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |mut request: Request<Body>| {
                    let router = router.clone();
                    async move {
                        let response = match read_body(&mut request, body_limit).await {
                            Ok(body) => router.route(request, body).await,
                            Err(response) => response,
                        };
                        Ok::<_, Infallible>(response)
                    }
                }))
            }
        });
        let server = hyper::Server::try_bind(&address)?;
        logger.log(format!("Listening on {}", address));
        server.serve(make_service).await
    }
}

#[cfg(test)]
mod tests {
    use super::DynamicUri;
    use hyper::{Body, Request, StatusCode};
    use std::collections::HashMap;

    #[test]
    fn dynamic_uri() {
        let uri = match DynamicUri::new("/radix/{value}.json") {
            Ok(uri) => uri,
            Err(error) => panic!("{}", error),
        };
        let expected: HashMap<String, String> = [("value".to_string(), "ff".to_string())].into_iter().collect();
        assert_eq!(uri.check("/radix/ff.json"), Some(expected));
        assert_eq!(uri.check("/radix/ffxjson"), None);
        assert_eq!(uri.check("/radix/a/b.json"), None);
    }

    #[test]
    fn parse_parameters() {
        let raw: HashMap<String, String> = [("value".to_string(), "a%20b".to_string())].into_iter().collect();
        let parameters = super::parse_parameters(raw, Some("from=1+0&to=16&flag"));
        let expected: HashMap<String, String> = [("value", "a b"), ("from", "1 0"), ("to", "16")]
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        assert_eq!(parameters, Ok(expected));
        assert!(super::parse_parameters(HashMap::new(), Some("x=%zz")).is_err());
    }

    #[test]
    fn read_body() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let mut request = Request::new(Body::from(vec![b'x'; 100]));
            assert_eq!(super::read_body(&mut request, 100).await.map(|body| body.len()).ok(), Some(100));

            let mut request = Request::new(Body::from(vec![b'x'; 101]));
            let status = super::read_body(&mut request, 100).await.err().map(|response| response.status());
            assert_eq!(status, Some(StatusCode::PAYLOAD_TOO_LARGE));
        });
    }
}
