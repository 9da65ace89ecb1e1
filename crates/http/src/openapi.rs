//! OpenAPI document assembled from the fragments each module contributes.

use libris_kernel::ModuleRegistry;
use serde_json::{json, Value};

/// JSON schema of a type deriving [`utoipa::ToSchema`], for use in module fragments.
pub fn schema_of<T: utoipa::ToSchema>() -> Value {
    serde_json::to_value(T::schema()).unwrap_or_else(|err| {
        tracing::warn!(schema = %T::name(), error = %err, "failed to render schema");
        json!({ "type": "object" })
    })
}

/// `$ref` pointing at a shared component schema.
pub fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

/// Response entry whose body is a JSON document matching `schema`.
pub fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": schema }
        }
    })
}

/// Response entry using the shared error envelope.
pub fn error_response(description: &str) -> Value {
    json_response(description, schema_ref("ErrorResponse"))
}

/// Path item for a module's plain-text `/health` route.
pub fn health_path(tag: &str) -> Value {
    json!({
        "get": {
            "summary": format!("{tag} health check"),
            "tags": [tag],
            "responses": {
                "200": {
                    "description": "OK",
                    "content": { "text/plain": { "schema": { "type": "string" } } }
                }
            }
        }
    })
}

fn base_document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "libris API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Library catalog and lending service"
        },
        "paths": {
            "/healthz": {
                "get": {
                    "summary": "Health check",
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "error": {
                            "type": "object",
                            "properties": {
                                "code": { "type": "string" },
                                "message": { "type": "string" },
                                "details": { "type": "array", "items": {} },
                                "trace_id": { "type": "string" },
                                "timestamp": { "type": "string" }
                            },
                            "required": ["code", "message", "trace_id", "timestamp"]
                        }
                    },
                    "required": ["error"]
                }
            }
        }
    })
}

/// Merge every module's fragment into one document.
///
/// Module paths are prefixed with `/api/{module_name}`; schemas share one namespace.
pub fn collect(registry: &ModuleRegistry) -> Value {
    let mut document = base_document();

    for module in registry.modules() {
        let Some(fragment) = module.openapi() else {
            continue;
        };

        if let Some(paths) = fragment.get("paths").and_then(Value::as_object) {
            for (path, item) in paths {
                let prefixed = format!("/api/{}{}", module.name(), path.trim_end_matches('/'));
                document["paths"][prefixed] = item.clone();
            }
        }

        if let Some(schemas) = fragment
            .pointer("/components/schemas")
            .and_then(Value::as_object)
        {
            for (name, schema) in schemas {
                document["components"]["schemas"][name] = schema.clone();
            }
        }
    }

    document
}
