use oxc_ast::ast::{Expression, ObjectPropertyKind, PropertyKey};

// ═══════════════════════════════════════════════════════════════════════════════
// ELEMENT DESCRIPTOR READER
// An object literal's ordered properties, read by identifier key.
// ═══════════════════════════════════════════════════════════════════════════════

/// Returns the value of the *last* property whose key is the plain
/// identifier `key`, or `None` when no property matches.
///
/// The forward scan keeps overwriting the result, so a duplicated key
/// resolves to the later entry. Computed and string-literal keys never
/// match, and spread entries are skipped. The input is never mutated.
pub fn get_value<'a, 'b>(
    properties: &'b [ObjectPropertyKind<'a>],
    key: &str,
) -> Option<&'b Expression<'a>> {
    let mut result = None;
    for prop in properties {
        if let ObjectPropertyKind::ObjectProperty(p) = prop {
            if let PropertyKey::StaticIdentifier(id) = &p.key {
                if id.name == key {
                    result = Some(&p.value);
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn with_object_literal<F: FnOnce(&[ObjectPropertyKind])>(source: &str, f: F) {
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_module(true);
        let expr = Parser::new(&allocator, source, source_type)
            .parse_expression()
            .unwrap();
        // `({...})` parses as a parenthesized expression; unwrap it.
        match expr.get_inner_expression() {
            Expression::ObjectExpression(obj) => f(&obj.properties),
            other => panic!("expected an object literal, got {:?}", other),
        }
    }

    fn as_string(expr: &Expression) -> String {
        match expr {
            Expression::StringLiteral(s) => s.value.to_string(),
            other => panic!("expected a string literal, got {:?}", other),
        }
    }

    #[test]
    fn test_reads_named_field() {
        with_object_literal(r#"({ block: "b", elem: "e" })"#, |props| {
            assert_eq!(as_string(get_value(props, "block").unwrap()), "b");
            assert_eq!(as_string(get_value(props, "elem").unwrap()), "e");
        });
    }

    #[test]
    fn test_missing_key_yields_none() {
        with_object_literal(r#"({ block: "b" })"#, |props| {
            assert!(get_value(props, "mods").is_none());
        });
    }

    #[test]
    fn test_empty_object_tolerated() {
        with_object_literal("({})", |props| {
            assert!(get_value(props, "block").is_none());
        });
    }

    #[test]
    fn test_last_write_wins() {
        with_object_literal(r#"({ tag: "div", tag: "span" })"#, |props| {
            assert_eq!(as_string(get_value(props, "tag").unwrap()), "span");
        });
    }

    #[test]
    fn test_computed_and_string_keys_ignored() {
        with_object_literal(r#"({ ["block"]: "a", "block": "c" })"#, |props| {
            assert!(get_value(props, "block").is_none());
        });
    }

    #[test]
    fn test_spread_entries_skipped() {
        with_object_literal(r#"({ ...rest, block: "b" })"#, |props| {
            assert_eq!(as_string(get_value(props, "block").unwrap()), "b");
        });
    }
}
