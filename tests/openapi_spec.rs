//! Checks over the generated OpenAPI document.

use product_api::ApiDoc;
use utoipa::OpenApi;

#[test]
fn document_serializes() {
    let doc = ApiDoc::openapi();
    let json = serde_json::to_string(&doc).unwrap();
    assert!(json.contains("\"openapi\""));
}

#[test]
fn all_paths_are_present() {
    let doc = ApiDoc::openapi();
    let paths: Vec<&str> = doc.paths.paths.keys().map(|k| k.as_str()).collect();

    // 6 operations over 2 paths
    assert_eq!(paths.len(), 2, "expected 2 paths: {paths:?}");
    assert!(paths.contains(&"/products/"));
    assert!(paths.contains(&"/products/{id}/"));

    let json = serde_json::to_value(&doc).unwrap();
    for method in ["get", "post"] {
        assert!(
            json["paths"]["/products/"].get(method).is_some(),
            "missing {method} on /products/"
        );
    }
    for method in ["get", "put", "patch", "delete"] {
        assert!(
            json["paths"]["/products/{id}/"].get(method).is_some(),
            "missing {method} on /products/{{id}}/"
        );
    }
}

#[test]
fn bearer_scheme_is_registered() {
    let doc = ApiDoc::openapi();
    let components = doc.components.as_ref().expect("components present");
    assert!(components.security_schemes.contains_key("bearer_auth"));
}

#[test]
fn product_schemas_are_registered() {
    let doc = ApiDoc::openapi();
    let components = doc.components.as_ref().expect("components present");
    for name in ["Product", "ProductInput", "ProductPatch", "ErrorBody"] {
        assert!(
            components.schemas.contains_key(name),
            "missing schema {name}"
        );
    }
}

#[test]
fn write_operations_require_the_bearer_scheme() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let collection = &doc["paths"]["/products/"];
    let post_security = collection["post"]["security"]
        .as_array()
        .expect("post declares security");
    assert!(post_security
        .iter()
        .any(|req| req.get("bearer_auth").is_some()));

    // reads stay open
    assert!(collection["get"].get("security").is_none());
}
