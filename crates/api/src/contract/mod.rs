//! Contract generation: the OpenAPI document rendered from the catalog.
//!
//! Generation is a pure function of (service info, security schemes, catalog).
//! Every map in the output is ordered, and nothing time-dependent is emitted,
//! so two runs over the same inputs serialize to identical bytes.

use std::collections::BTreeMap;

use thiserror::Error;
use utoipa::openapi::path::{
    HttpMethod as OpenApiMethod, Operation as OpenApiOperation, OperationBuilder, ParameterBuilder,
    ParameterIn,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{ArrayBuilder, ObjectBuilder, Type};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::openapi::{
    ComponentsBuilder, ContentBuilder, InfoBuilder, OpenApi, OpenApiBuilder, Paths, Ref, RefOr,
    Required, ResponseBuilder, Schema, ServerBuilder,
};

use crate::app::dto::{ErrorResponse, PageMetadata};
use crate::catalog::{BEARER, Catalog, HttpMethod, Operation, ParamKind, Payload, SchemaRef};
use crate::config::AppConfig;

pub mod export;
mod summary;

pub use summary::ContractSummary;

const JSON: &str = "application/json";

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("operation '{operation}' requires unknown security scheme '{scheme}'")]
    UnknownSecurityScheme {
        operation: &'static str,
        scheme: &'static str,
    },

    #[error("failed to serialize contract document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `info` and `servers` of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub title: String,
    pub version: String,
    pub description: String,
    pub server_url: String,
    pub server_description: String,
}

impl ServiceInfo {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            title: config.app_name.clone(),
            version: "1.0.0".to_string(),
            description: "Contact management REST API: users, contacts and their addresses."
                .to_string(),
            server_url: format!("http://localhost:{}", config.web_port),
            server_description: "Development server".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeKind {
    Basic,
    Bearer { format: Option<String> },
}

/// A named security scheme published under `components.securitySchemes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecuritySchemeDef {
    pub name: String,
    pub kind: SchemeKind,
    pub description: String,
}

impl SecuritySchemeDef {
    /// The scheme the auth interceptor enforces.
    pub fn bearer_jwt() -> Self {
        Self {
            name: BEARER.to_string(),
            kind: SchemeKind::Bearer {
                format: Some("JWT".to_string()),
            },
            description: "Bearer token authentication".to_string(),
        }
    }

    fn to_openapi(&self) -> SecurityScheme {
        let http = match &self.kind {
            SchemeKind::Basic => HttpBuilder::new().scheme(HttpAuthScheme::Basic),
            SchemeKind::Bearer { format } => {
                let builder = HttpBuilder::new().scheme(HttpAuthScheme::Bearer);
                match format {
                    Some(format) => builder.bearer_format(format.clone()),
                    None => builder,
                }
            }
        };
        SecurityScheme::Http(http.description(Some(self.description.clone())).build())
    }
}

#[derive(Debug, Clone)]
pub struct ContractGenerator {
    info: ServiceInfo,
    schemes: BTreeMap<String, SecuritySchemeDef>,
}

impl ContractGenerator {
    pub fn new(info: ServiceInfo, schemes: impl IntoIterator<Item = SecuritySchemeDef>) -> Self {
        Self {
            info,
            schemes: schemes.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    pub fn generate(&self, catalog: &Catalog) -> Result<OpenApi, ContractError> {
        let mut schemas = SchemaRegistry::default();
        schemas.insert(SchemaRef::of::<ErrorResponse>());

        let mut paths = Paths::new();
        for op in catalog.iter() {
            if let Some(scheme) = op.security.iter().find(|s| !self.schemes.contains_key(**s)) {
                return Err(ContractError::UnknownSecurityScheme {
                    operation: op.id,
                    scheme: *scheme,
                });
            }
            paths.add_path_operation(op.path, vec![openapi_method(op.method)], render(op, &mut schemas));
        }

        let mut components = ComponentsBuilder::new();
        for (name, schema) in schemas.0 {
            components = components.schema(name, schema);
        }
        for (name, scheme) in &self.schemes {
            components = components.security_scheme(name.clone(), scheme.to_openapi());
        }

        let info = InfoBuilder::new()
            .title(self.info.title.clone())
            .version(self.info.version.clone())
            .description(Some(self.info.description.clone()))
            .build();
        let server = ServerBuilder::new()
            .url(self.info.server_url.clone())
            .description(Some(self.info.server_description.clone()))
            .build();

        Ok(OpenApiBuilder::new()
            .info(info)
            .servers(Some(vec![server]))
            .paths(paths)
            .components(Some(components.build()))
            .build())
    }
}

pub fn to_pretty_json(doc: &OpenApi) -> Result<String, ContractError> {
    Ok(doc.to_pretty_json()?)
}

/// Component schemas referenced so far, keyed by name.
#[derive(Default)]
struct SchemaRegistry(BTreeMap<String, RefOr<Schema>>);

impl SchemaRegistry {
    /// Registers the schema and returns a `$ref` to it.
    fn insert(&mut self, schema: SchemaRef) -> RefOr<Schema> {
        let name = schema.name().into_owned();
        let reference = RefOr::Ref(Ref::from_schema_name(name.clone()));
        self.0.entry(name).or_insert_with(|| schema.schema());
        reference
    }
}

fn openapi_method(method: HttpMethod) -> OpenApiMethod {
    match method {
        HttpMethod::Get => OpenApiMethod::Get,
        HttpMethod::Post => OpenApiMethod::Post,
        HttpMethod::Put => OpenApiMethod::Put,
        HttpMethod::Patch => OpenApiMethod::Patch,
        HttpMethod::Delete => OpenApiMethod::Delete,
    }
}

fn primitive(ty: Type) -> ObjectBuilder {
    ObjectBuilder::new().schema_type(ty)
}

fn render(op: &Operation, schemas: &mut SchemaRegistry) -> OpenApiOperation {
    let mut builder = OperationBuilder::new()
        .operation_id(Some(op.id))
        .summary(Some(op.summary))
        .description(Some(op.description))
        .tags(Some(op.tags.iter().map(|t| t.to_string()).collect::<Vec<_>>()));

    for param in &op.path_params {
        builder = builder.parameter(
            ParameterBuilder::new()
                .name(param.name)
                .parameter_in(ParameterIn::Path)
                .required(Required::True)
                .description(Some(param.description))
                .schema(Some(primitive(Type::String).build()))
                .build(),
        );
    }

    for param in &op.query_params {
        let schema = match param.kind {
            ParamKind::String => primitive(Type::String),
            ParamKind::Integer { default } => primitive(Type::Integer).default(Some(default.into())),
        };
        builder = builder.parameter(
            ParameterBuilder::new()
                .name(param.name)
                .parameter_in(ParameterIn::Query)
                .required(Required::False)
                .description(Some(param.description))
                .schema(Some(schema.build()))
                .build(),
        );
    }

    if let Some(body) = op.body {
        let reference = schemas.insert(body);
        builder = builder.request_body(Some(
            RequestBodyBuilder::new()
                .content(JSON, ContentBuilder::new().schema(Some(reference)).build())
                .required(Some(Required::True))
                .build(),
        ));
    }

    builder = builder
        .response(
            "200",
            ResponseBuilder::new()
                .description("OK")
                .content(JSON, ContentBuilder::new().schema(Some(envelope(op.output, schemas))).build())
                .build(),
        )
        .response(
            "default",
            ResponseBuilder::new()
                .description("Error")
                .content(
                    JSON,
                    ContentBuilder::new()
                        .schema(Some(schemas.insert(SchemaRef::of::<ErrorResponse>())))
                        .build(),
                )
                .build(),
        );

    for scheme in &op.security {
        builder = builder.security(SecurityRequirement::new(*scheme, Vec::<String>::new()));
    }

    builder.build()
}

/// `{ data, paging?, errors? }` around the operation's payload.
fn envelope(payload: Payload, schemas: &mut SchemaRegistry) -> RefOr<Schema> {
    let array_of = |schemas: &mut SchemaRegistry, item: SchemaRef| {
        RefOr::T(Schema::Array(ArrayBuilder::new().items(schemas.insert(item)).build()))
    };

    let data = match payload {
        Payload::Object(item) => schemas.insert(item),
        Payload::List(item) | Payload::Paged(item) => array_of(schemas, item),
        Payload::Flag => RefOr::T(Schema::Object(primitive(Type::Boolean).build())),
    };

    let mut object = ObjectBuilder::new()
        .schema_type(Type::Object)
        .property("data", data)
        .required("data");
    if matches!(payload, Payload::Paged(_)) {
        object = object.property("paging", schemas.insert(SchemaRef::of::<PageMetadata>()));
    }
    object = object.property("errors", primitive(Type::String).build());

    RefOr::T(Schema::Object(object.build()))
}
