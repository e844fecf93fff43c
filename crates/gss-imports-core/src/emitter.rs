use crate::ast::{AtRule, Group, Node, StringLiteral, Stylesheet};

pub fn emit_scss(stylesheet: &Stylesheet) -> String {
    let mut out = String::new();
    emit_nodes(&stylesheet.nodes, &mut out);
    out
}

fn emit_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::AtRule(rule) => emit_at_rule(rule, out),
            Node::StringLiteral(lit) => emit_string(lit, out),
            Node::Group(group) => emit_group(group, out),
            Node::Comment(text) | Node::Text(text) => out.push_str(text),
        }
    }
}

fn emit_at_rule(rule: &AtRule, out: &mut String) {
    out.push('@');
    out.push_str(&rule.keyword);
    emit_nodes(&rule.children, out);
}

fn emit_string(lit: &StringLiteral, out: &mut String) {
    let quote = lit.quote.as_char();
    out.push(quote);
    out.push_str(&lit.value);
    out.push(quote);
}

fn emit_group(group: &Group, out: &mut String) {
    out.push_str(group.delimiter.open());
    emit_nodes(&group.children, out);
    out.push(group.delimiter.close());
}
