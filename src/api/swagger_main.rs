use crate::dto;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Rust Todo API",
    description = "Create, list, edit and delete todo items"
))]
struct TodoServiceApi;

/// Builds the OpenAPI document for every route the service exposes
pub fn openapi_document() -> utoipa::openapi::OpenApi {
    let mut api_docs = TodoServiceApi::openapi();
    api_docs.merge(dto::OpenApiSchemas::openapi());
    api_docs.merge(super::todo::TodoApi::openapi());

    api_docs
}

/// Constructs the route on the API that renders the swagger UI and returns the OpenAPI schema.
pub fn build_documentation() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi_document())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_todo_route() {
        let document = openapi_document();
        let paths = &document.paths.paths;

        let listing = paths.get("/todos").expect("/todos should be documented");
        assert!(listing.operations.len() == 2);

        let by_id = paths
            .get("/todos/{todo_id}")
            .expect("/todos/{todo_id} should be documented");
        assert!(by_id.operations.len() == 2);
    }

    #[test]
    fn registers_shared_schemas() {
        let document = openapi_document();
        let components = document.components.expect("schemas should be registered");

        for schema in ["Todo", "NewTodo", "UpdateTodo", "TodoStatus", "BasicErrorResponse"] {
            assert!(
                components.schemas.contains_key(schema),
                "missing schema {schema}"
            );
        }
    }
}
