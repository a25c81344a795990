//! Node-kind view over the Swift syntax tree.
//!
//! Rules never touch grammar-specific node names directly; this module
//! classifies tree-sitter nodes into the handful of shapes the catalog
//! cares about and extracts values from them. Every helper returns an
//! `Option` and callers skip on `None` - a shape that does not match is
//! never an error.

use tree_sitter::Node;

use super::source::SourceFile;

/// The node shapes the rule catalog dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `target = value` (any assignment operator).
    Assignment,
    /// `base.property` member access.
    MemberAccess,
    /// A function or initializer call.
    Call,
    /// A `while` loop.
    While,
    /// A `func` declaration.
    FunctionDecl,
    /// A `[key: value, ...]` dictionary literal.
    DictionaryLiteral,
    /// Anything else; visitors ignore these.
    Other,
}

/// Classify a raw tree-sitter node.
pub fn classify(node: Node) -> NodeKind {
    match node.kind() {
        "assignment" => NodeKind::Assignment,
        "navigation_expression" => NodeKind::MemberAccess,
        "call_expression" => NodeKind::Call,
        "while_statement" => NodeKind::While,
        "function_declaration" => NodeKind::FunctionDecl,
        "dictionary_literal" => NodeKind::DictionaryLiteral,
        _ => NodeKind::Other,
    }
}

fn last_named_child<'t>(node: Node<'t>) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).last()
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let result = node.named_children(&mut cursor).find(|n| n.kind() == kind);
    result
}

fn is_identifier_text(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// The property name on a `navigation_expression`, i.e. the identifier
/// after the last dot.
pub fn navigated_property<'f>(file: &'f SourceFile, node: Node) -> Option<&'f str> {
    let suffix = node
        .child_by_field_name("suffix")
        .or_else(|| child_of_kind(node, "navigation_suffix"))?;
    let ident = suffix
        .child_by_field_name("suffix")
        .or_else(|| last_named_child(suffix))?;
    if ident.kind() == "simple_identifier" {
        Some(file.node_text(ident))
    } else {
        None
    }
}

/// True when a member access sits on a plain identifier (or `self`), the
/// shape the bare-read rules require.
pub fn access_base_is_identifier(node: Node) -> bool {
    let base = node
        .child_by_field_name("target")
        .or_else(|| node.named_child(0));
    matches!(
        base.map(|b| b.kind()),
        Some("simple_identifier" | "self_expression")
    )
}

/// True when this expression is (part of) the left-hand side of an
/// assignment. Used to keep assignment targets out of the bare-read rules.
pub fn is_assignment_target(node: Node) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        match parent.kind() {
            "directly_assignable_expression" => return true,
            "assignment" | "statements" | "source_file" => return false,
            _ => current = parent.parent(),
        }
    }
    false
}

/// The property name assigned by an `assignment` node, for both
/// `receiver.property = v` and bare `property = v` targets.
pub fn assignment_target_property<'f>(file: &'f SourceFile, node: Node) -> Option<&'f str> {
    let target = node
        .child_by_field_name("target")
        .or_else(|| node.named_child(0))?;
    let inner = if target.kind() == "directly_assignable_expression" {
        target.named_child(0)?
    } else {
        target
    };
    match inner.kind() {
        "simple_identifier" => Some(file.node_text(inner)),
        "navigation_expression" => navigated_property(file, inner),
        _ => None,
    }
}

/// The right-hand side of an `assignment` node.
pub fn assignment_value<'t>(node: Node<'t>) -> Option<Node<'t>> {
    node.child_by_field_name("result")
        .or_else(|| last_named_child(node))
}

/// `true`/`false` from a boolean literal node.
pub fn bool_literal(file: &SourceFile, node: Node) -> Option<bool> {
    if node.kind() == "boolean_literal" {
        Some(file.node_text(node) == "true")
    } else {
        None
    }
}

/// Integer value from an integer literal node. Underscore separators are
/// accepted the way Swift writes them (`648_000`).
pub fn int_literal(file: &SourceFile, node: Node) -> Option<i64> {
    if node.kind() != "integer_literal" {
        return None;
    }
    file.node_text(node).replace('_', "").parse().ok()
}

/// The case name of an enum-style value: `.aggregate` or
/// `NSURLRequest.CachePolicy.returnCacheDataElseLoad` both yield the text
/// after the last dot. Literals and calls are never enum cases.
pub fn enum_case<'f>(file: &'f SourceFile, node: Node) -> Option<&'f str> {
    if matches!(
        node.kind(),
        "boolean_literal"
            | "integer_literal"
            | "real_literal"
            | "line_string_literal"
            | "multi_line_string_literal"
            | "array_literal"
            | "dictionary_literal"
            | "call_expression"
    ) {
        return None;
    }
    let text = file.node_text(node).trim();
    let (_, case) = text.rsplit_once('.')?;
    is_identifier_text(case).then_some(case)
}

/// The callee expression of a `call_expression`.
pub fn call_callee<'t>(node: Node<'t>) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let result = node
        .named_children(&mut cursor)
        .find(|n| n.kind() != "call_suffix");
    result
}

/// For `Base.member(...)` calls, the member name after the dot.
pub fn call_member_name<'f>(file: &'f SourceFile, node: Node) -> Option<&'f str> {
    let callee = call_callee(node)?;
    if callee.kind() == "navigation_expression" {
        navigated_property(file, callee)
    } else {
        None
    }
}

/// For `Base.member(...)` calls, the base identifier before the dot.
pub fn call_base_name<'f>(file: &'f SourceFile, node: Node) -> Option<&'f str> {
    let callee = call_callee(node)?;
    if callee.kind() != "navigation_expression" {
        return None;
    }
    let base = callee.child_by_field_name("target")?;
    if base.kind() == "simple_identifier" {
        Some(file.node_text(base))
    } else {
        None
    }
}

/// For `Name(...)` initializer-style calls, the bare callee identifier.
pub fn call_function_name<'f>(file: &'f SourceFile, node: Node) -> Option<&'f str> {
    let callee = call_callee(node)?;
    if callee.kind() == "simple_identifier" {
        Some(file.node_text(callee))
    } else {
        None
    }
}

/// The boolean value of a labeled call argument, e.g. `repeats: true`.
/// `None` when the label is absent or its value is not a boolean literal.
pub fn call_bool_argument(file: &SourceFile, node: Node, label: &str) -> Option<bool> {
    let suffix = child_of_kind(node, "call_suffix")?;
    let arguments = child_of_kind(suffix, "value_arguments")?;
    let mut cursor = arguments.walk();
    let candidates: Vec<Node> = arguments
        .named_children(&mut cursor)
        .filter(|n| n.kind() == "value_argument")
        .collect();
    for argument in candidates {
        let name_node = argument.child_by_field_name("name").or_else(|| {
            let mut inner = argument.walk();
            let children: Vec<_> = argument.named_children(&mut inner).collect();
            // A labeled argument has at least a label node and a value node.
            (children.len() >= 2).then(|| children[0])
        });
        let name = match name_node {
            Some(n) => file.node_text(n),
            None => continue,
        };
        if name != label {
            continue;
        }
        let value = argument
            .child_by_field_name("value")
            .or_else(|| last_named_child(argument))?;
        return bool_literal(file, value);
    }
    None
}

/// Direct statements of a `while` loop body. Only these - not nested
/// blocks - are in scope for the loop rules.
pub fn loop_body_statements<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let body = match child_of_kind(node, "statements") {
        Some(b) => b,
        None => return Vec::new(),
    };
    let mut cursor = body.walk();
    body.named_children(&mut cursor).collect()
}

/// The declared name of a `function_declaration`.
pub fn function_name<'f>(file: &'f SourceFile, node: Node) -> Option<&'f str> {
    let name = node
        .child_by_field_name("name")
        .or_else(|| child_of_kind(node, "simple_identifier"))?;
    Some(file.node_text(name))
}

/// Direct statements of a function body, empty when the body is absent.
pub fn function_body_statements<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let body = match child_of_kind(node, "function_body") {
        Some(b) => b,
        None => return Vec::new(),
    };
    let statements = match child_of_kind(body, "statements") {
        Some(s) => s,
        None => return Vec::new(),
    };
    let mut cursor = statements.walk();
    statements.named_children(&mut cursor).collect()
}

/// True when the function declaration has a body at all.
pub fn has_function_body(node: Node) -> bool {
    child_of_kind(node, "function_body").is_some()
}

/// The parameter nodes of a `function_declaration`, excluding anything
/// declared inside its body.
pub fn function_parameters<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut parameters = Vec::new();
    collect_parameters(node, &mut parameters);
    parameters
}

fn collect_parameters<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    let children: Vec<_> = node.named_children(&mut cursor).collect();
    for child in children {
        match child.kind() {
            "parameter" => out.push(child),
            "function_body" => {}
            _ => collect_parameters(child, out),
        }
    }
}

/// The first (external) name of a parameter, the one callers write.
pub fn parameter_first_name<'f>(file: &'f SourceFile, node: Node) -> Option<&'f str> {
    let name = node
        .child_by_field_name("external_name")
        .or_else(|| node.child_by_field_name("name"))
        .or_else(|| child_of_kind(node, "simple_identifier"))?;
    Some(file.node_text(name))
}

/// The declared type text of a parameter.
pub fn parameter_type_text<'f>(file: &'f SourceFile, node: Node) -> Option<&'f str> {
    let ty = node
        .child_by_field_name("type")
        .or_else(|| last_named_child(node))?;
    Some(file.node_text(ty))
}

/// Key/value expression pairs of a dictionary literal, in source order.
pub fn dictionary_entries<'t>(node: Node<'t>) -> Vec<(Node<'t>, Node<'t>)> {
    let mut entries = Vec::new();
    let mut cursor = node.walk();
    if !cursor.goto_first_child() {
        return entries;
    }
    let mut key = None;
    loop {
        match cursor.field_name() {
            Some("key") => key = Some(cursor.node()),
            Some("value") => {
                if let Some(k) = key.take() {
                    entries.push((k, cursor.node()));
                }
            }
            _ => {}
        }
        if !cursor.goto_next_sibling() {
            break;
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn parse(source: &str) -> SourceFile {
        SourceFile::parse(Path::new("Test.swift"), source.as_bytes()).unwrap()
    }

    fn find_kind<'t>(node: Node<'t>, kind: NodeKind) -> Option<Node<'t>> {
        if classify(node) == kind {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        children.into_iter().find_map(|c| find_kind(c, kind))
    }

    #[test]
    fn test_assignment_member_target_and_bool_value() {
        let file = parse("config.httpShouldSetCookies = true\n");
        let node = find_kind(file.tree.root_node(), NodeKind::Assignment).unwrap();
        assert_eq!(
            assignment_target_property(&file, node),
            Some("httpShouldSetCookies")
        );
        let value = assignment_value(node).unwrap();
        assert_eq!(bool_literal(&file, value), Some(true));
    }

    #[test]
    fn test_assignment_bare_target() {
        let file = parse("allowsExpensiveNetworkAccess = true\n");
        let node = find_kind(file.tree.root_node(), NodeKind::Assignment).unwrap();
        assert_eq!(
            assignment_target_property(&file, node),
            Some("allowsExpensiveNetworkAccess")
        );
    }

    #[test]
    fn test_assignment_int_value_with_separator() {
        let file = parse("config.timeoutIntervalForResource = 648_000\n");
        let node = find_kind(file.tree.root_node(), NodeKind::Assignment).unwrap();
        let value = assignment_value(node).unwrap();
        assert_eq!(int_literal(&file, value), Some(648_000));
    }

    #[test]
    fn test_enum_case_from_implicit_member() {
        let file = parse("config.httpCookieAcceptPolicy = .always\n");
        let node = find_kind(file.tree.root_node(), NodeKind::Assignment).unwrap();
        let value = assignment_value(node).unwrap();
        assert_eq!(enum_case(&file, value), Some("always"));
    }

    #[test]
    fn test_enum_case_from_qualified_member() {
        let file = parse("config.requestCachePolicy = NSURLRequest.CachePolicy.returnCacheDataDontLoad\n");
        let node = find_kind(file.tree.root_node(), NodeKind::Assignment).unwrap();
        let value = assignment_value(node).unwrap();
        assert_eq!(enum_case(&file, value), Some("returnCacheDataDontLoad"));
    }

    #[test]
    fn test_bare_read_vs_assignment_target() {
        let file = parse("let t = config.timeoutIntervalForRequest\n");
        let access = find_kind(file.tree.root_node(), NodeKind::MemberAccess).unwrap();
        assert_eq!(
            navigated_property(&file, access),
            Some("timeoutIntervalForRequest")
        );
        assert!(access_base_is_identifier(access));
        assert!(!is_assignment_target(access));

        let file = parse("config.timeoutIntervalForRequest = 60\n");
        let target = find_kind(file.tree.root_node(), NodeKind::MemberAccess).unwrap();
        assert!(is_assignment_target(target));
    }

    #[test]
    fn test_call_names_and_bool_argument() {
        let file = parse(
            "Timer.scheduledTimer(timeInterval: 1.0, target: self, selector: #selector(tick), userInfo: nil, repeats: true)\n",
        );
        let call = find_kind(file.tree.root_node(), NodeKind::Call).unwrap();
        assert_eq!(call_base_name(&file, call), Some("Timer"));
        assert_eq!(call_member_name(&file, call), Some("scheduledTimer"));
        assert_eq!(call_bool_argument(&file, call, "repeats"), Some(true));
        assert_eq!(call_bool_argument(&file, call, "missing"), None);
    }

    #[test]
    fn test_initializer_call_name() {
        let file = parse("let cache = URLCache(memoryCapacity: 512, diskCapacity: 1024)\n");
        let call = find_kind(file.tree.root_node(), NodeKind::Call).unwrap();
        assert_eq!(call_function_name(&file, call), Some("URLCache"));
    }

    #[test]
    fn test_loop_body_statements_are_direct_only() {
        let file = parse(
            "while running {\n    Thread.sleep(forTimeInterval: 1.0)\n    if done {\n        Thread.sleep(forTimeInterval: 2.0)\n    }\n}\n",
        );
        let node = find_kind(file.tree.root_node(), NodeKind::While).unwrap();
        let statements = loop_body_statements(node);
        assert_eq!(statements.len(), 2);
        let direct_sleeps = statements
            .iter()
            .filter(|s| classify(**s) == NodeKind::Call)
            .count();
        assert_eq!(direct_sleeps, 1);
    }

    #[test]
    fn test_function_name_and_parameters() {
        let file = parse(
            "func application(_ application: UIApplication, didReceiveRemoteNotification userInfo: [AnyHashable: Any]) {\n}\n",
        );
        let node = find_kind(file.tree.root_node(), NodeKind::FunctionDecl).unwrap();
        assert_eq!(function_name(&file, node), Some("application"));
        let params = function_parameters(node);
        assert!(params
            .iter()
            .any(|p| parameter_first_name(&file, *p) == Some("didReceiveRemoteNotification")));
        assert!(params
            .iter()
            .any(|p| parameter_type_text(&file, *p) == Some("UIApplication")));
    }

    #[test]
    fn test_dictionary_entries() {
        let file = parse("let payload = [\"content-available\": 1, \"sound\": 0]\n");
        let node = find_kind(file.tree.root_node(), NodeKind::DictionaryLiteral).unwrap();
        let entries = dictionary_entries(node);
        assert_eq!(entries.len(), 2);
        assert!(file.node_text(entries[0].0).contains("content-available"));
        assert_eq!(int_literal(&file, entries[0].1), Some(1));
    }
}
