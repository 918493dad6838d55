use discogen_core::GeneratorError;
use discogen_core::ir::{
    ApiMethodDeclaration, HttpMethod, Optionality, PropertyDeclaration, ServiceDeclaration,
};
use minijinja::{Environment, Value, context};

use super::model_class::properties_ctx;
use super::render;
use crate::type_mapper::{declared_type, query_value, swift_type};

/// Completion argument used when a method has no response body.
const SUCCESS_VAR: &str = "success";

/// Emit the service singleton with one method per API method.
pub fn emit_service(env: &Environment<'_>, service: &ServiceDeclaration) -> Result<String, GeneratorError> {
    let methods: Vec<Value> = service.methods.iter().map(method_ctx).collect();
    render(
        env,
        "service.swift.j2",
        context! {
            name => service.name.clone(),
            api_name => service.api_name.clone(),
            api_version => service.api_version.clone(),
            description => service.description.clone(),
            global_params => properties_ctx(&service.global_params),
            methods => methods,
            setup => setup_lines(&service.global_params),
        },
    )
}

fn method_ctx(method: &ApiMethodDeclaration) -> Value {
    let signature = match &method.signature_override {
        Some(signature) => signature.clone(),
        None => signature(method),
    };
    context! {
        name => method.name.clone(),
        description => method.description.clone(),
        declared => properties_ctx(&method.declared_params),
        signature => signature,
        body => method_body(method),
    }
}

/// `public func name(required..., optional: T? = nil, completionHandler: ...)`
pub fn signature(method: &ApiMethodDeclaration) -> String {
    let mut args: Vec<String> = method
        .required_params
        .iter()
        .map(|param| {
            let property = &param.property;
            let mut arg = match &param.label {
                Some(label) if label != &property.identifier_name => {
                    format!("{label} {}: {}", property.identifier_name, declared_type(property))
                }
                _ => format!("{}: {}", property.identifier_name, declared_type(property)),
            };
            if let Some(default) = &property.default_value {
                arg.push_str(" = ");
                arg.push_str(default);
            }
            arg
        })
        .collect();
    args.extend(method.optional_params.iter().map(|p| {
        format!("{}: {}? = nil", p.identifier_name, swift_type(&p.target_type))
    }));
    let (var, ty) = completion_value(method);
    args.push(format!(
        "completionHandler: @escaping (_ {var}: {ty}?, _ error: Error?) -> ()"
    ));
    format!("public func {}({})", method.name, args.join(", "))
}

fn completion_value(method: &ApiMethodDeclaration) -> (String, String) {
    match &method.response {
        Some(body) => (body.var_name.clone(), swift_type(&body.type_ref)),
        None => (SUCCESS_VAR.to_string(), "Bool".to_string()),
    }
}

fn method_body(method: &ApiMethodDeclaration) -> Vec<String> {
    let mut lines = Vec::new();
    let required_query: Vec<&PropertyDeclaration> = method.required_query_params().collect();
    let mutates = !required_query.is_empty() || !method.optional_params.is_empty();
    lines.push(format!(
        "{} queryParams = setUpQueryParams()",
        if mutates { "var" } else { "let" }
    ));
    for param in required_query {
        lines.push(update_value(param, &param.identifier_name));
    }
    for param in &method.optional_params {
        let ident = &param.identifier_name;
        if param.optionality == Optionality::NonOptional {
            lines.push(format!("let {ident} = {ident} ?? self.{ident}"));
            lines.push(update_value(param, ident));
        } else {
            lines.push(format!("if let {ident} = {ident} ?? self.{ident} {{"));
            lines.push(format!("    {}", update_value(param, ident)));
            lines.push("}".to_string());
        }
    }

    let mut request = String::from("GoogleServiceFetcher.sharedInstance.performRequest(");
    if method.http_method != HttpMethod::Get {
        request.push('.');
        request.push_str(method.http_method.as_str());
        request.push_str(", ");
    }
    request.push_str(&format!(
        "serviceName: apiNameInURL, apiVersion: apiVersionString, endpoint: \"{}\", queryParams: queryParams",
        endpoint_literal(&method.endpoint, &method.parameters)
    ));
    if let Some(body) = &method.request_body {
        request.push_str(&format!(
            ", postBody: Mapper<{}>().toJSON({})",
            swift_type(&body.type_ref),
            body.var_name
        ));
    }
    request.push_str(") { (JSON, error) -> () in");
    lines.push(request);

    lines.push("    if error != nil {".to_string());
    match &method.response {
        Some(body) => {
            let var = &body.var_name;
            lines.push("        completionHandler(nil, error)".to_string());
            lines.push("    } else if JSON != nil {".to_string());
            lines.push(format!(
                "        let {var} = Mapper<{}>().map(JSONObject: JSON)",
                swift_type(&body.type_ref)
            ));
            lines.push(format!("        completionHandler({var}, nil)"));
        }
        None => {
            lines.push("        completionHandler(false, error)".to_string());
            lines.push("    } else {".to_string());
            lines.push("        completionHandler(true, nil)".to_string());
        }
    }
    lines.push("    }".to_string());
    lines.push("}".to_string());
    lines
}

fn setup_lines(global_params: &[PropertyDeclaration]) -> Vec<String> {
    let mut lines = vec!["var queryParams = [String: String]()".to_string()];
    for param in global_params {
        let ident = &param.identifier_name;
        if param.optionality == Optionality::NonOptional {
            lines.push(update_value(param, ident));
        } else {
            lines.push(format!("if let {ident} = {ident} {{"));
            lines.push(format!("    {}", update_value(param, ident)));
            lines.push("}".to_string());
        }
    }
    lines.push("return queryParams".to_string());
    lines
}

fn update_value(param: &PropertyDeclaration, var: &str) -> String {
    format!(
        "queryParams.updateValue({}, forKey: \"{}\")",
        query_value(param, var),
        param.source_name
    )
}

/// Rewrite `{name}` and `{+name}` path placeholders as Swift interpolations.
///
/// Enum-typed params interpolate their `rawValue`.
pub fn endpoint_literal(endpoint: &str, parameters: &[PropertyDeclaration]) -> String {
    let mut out = String::with_capacity(endpoint.len());
    let mut rest = endpoint;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let raw = rest[start + 1..start + len].trim_start_matches('+');
        let param = parameters.iter().find(|p| p.source_name == raw);
        out.push_str("\\(");
        out.push_str(param.map_or(raw, |p| p.identifier_name.as_str()));
        if param.is_some_and(|p| p.is_enum) {
            out.push_str(".rawValue");
        }
        out.push(')');
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}
