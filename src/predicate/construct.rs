//! Built-in structural heuristics.
//!
//! Each [`Construct`] recognises one construct class in both the brace-style
//! (JavaScript) and indentation-style (Python) spellings used by the bundled
//! fixtures. Keyword checks run on text with string literals and comments
//! masked out. Template strings are matched on the raw text, and comments are
//! counted while masking, so markers inside strings never count as comments.

use once_cell::sync::Lazy;
use regex::Regex;

use super::scan::{indent_of, mask_literals, matching_delimiter};
use super::Evaluate;

macro_rules! regex {
    ($name:ident, $pattern:expr) => {
        static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($pattern).expect(concat!("invalid regex: ", $pattern)));
    };
}

regex!(JS_FUNCTION, r"\bfunction\s+[A-Za-z_$][\w$]*\s*\(");
regex!(PY_FUNCTION, r"(?m)^[ \t]*(?:async[ \t]+)?def[ \t]+[A-Za-z_]\w*[ \t]*\(");
regex!(
    CLASS,
    r"(?m)^[ \t]*(?:export[ \t]+(?:default[ \t]+)?)?class[ \t]+[A-Za-z_$]"
);
regex!(
    ASYNC,
    r"\basync\s+(?:function\b|def\b|[A-Za-z_$][\w$]*\s*\()|\basync\s*\("
);
regex!(AWAIT, r"\bawait\b");
regex!(JS_LOOP, r"\b(?:for(?:\s+await)?|while)\s*\(");
regex!(
    PY_LOOP,
    r"(?m)^[ \t]*(?:(?:async[ \t]+)?for[ \t]+.+[ \t]+in[ \t]+.+|while[ \t]+.+):[ \t]*$"
);
regex!(JS_CONDITIONAL, r"\bif\s*\(");
regex!(PY_CONDITIONAL, r"(?m)^[ \t]*(?:el)?if[ \t]+.+:[ \t]*$");
regex!(ELSE, r"\belse\b");
regex!(TRY, r"\btry\s*[{:]");
regex!(CATCH, r"\b(?:catch|except)\b");
regex!(JS_TEMPLATE, r"`[^`]*\$\{[^`]*\}[^`]*`");
regex!(
    PY_FSTRING,
    r#"(?:^|\W)(?:[fF][rR]?|[rR][fF])(?:"[^"\n]*\{[^}"\n]*\}[^"\n]*"|'[^'\n]*\{[^}'\n]*\}[^'\n]*')"#
);
regex!(ARROW, r"=>|\blambda\b");
regex!(COMPREHENSION, r"\[[^\[\]]*\bfor\b[^\[\]]*\bin\b[^\[\]]*\]");

/// Construct classes a highlighter fixture is expected to exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    Function,
    NestedFunction,
    Class,
    Async,
    Await,
    Loop,
    Conditional,
    Else,
    TryCatch,
    TemplateLiteral,
    ArrowFunction,
    NestedObjectLiteral,
    Comment,
    EmptyLineInBlock,
    Comprehension,
}

impl Construct {
    pub const ALL: [Construct; 15] = [
        Construct::Function,
        Construct::NestedFunction,
        Construct::Class,
        Construct::Async,
        Construct::Await,
        Construct::Loop,
        Construct::Conditional,
        Construct::Else,
        Construct::TryCatch,
        Construct::TemplateLiteral,
        Construct::ArrowFunction,
        Construct::NestedObjectLiteral,
        Construct::Comment,
        Construct::EmptyLineInBlock,
        Construct::Comprehension,
    ];

    /// Predicate name used in catalogs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Construct::Function => "hasFunction",
            Construct::NestedFunction => "hasNestedFunction",
            Construct::Class => "hasClass",
            Construct::Async => "hasAsync",
            Construct::Await => "hasAwait",
            Construct::Loop => "hasLoop",
            Construct::Conditional => "hasConditional",
            Construct::Else => "hasElse",
            Construct::TryCatch => "hasTryCatch",
            Construct::TemplateLiteral => "hasTemplateLiteral",
            Construct::ArrowFunction => "hasArrowFunction",
            Construct::NestedObjectLiteral => "hasNestedObjectLiteral",
            Construct::Comment => "hasComment",
            Construct::EmptyLineInBlock => "hasEmptyLineInBlock",
            Construct::Comprehension => "hasComprehension",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Construct::Function => "function declaration (`function f(` / `def f(`)",
            Construct::NestedFunction => "function declared inside another function body",
            Construct::Class => "class declaration",
            Construct::Async => "async function or method",
            Construct::Await => "await expression",
            Construct::Loop => "for / while loop",
            Construct::Conditional => "if / elif conditional",
            Construct::Else => "else branch",
            Construct::TryCatch => "try block with catch / except",
            Construct::TemplateLiteral => "interpolated string (`${..}` template or f-string)",
            Construct::ArrowFunction => "arrow function or lambda",
            Construct::NestedObjectLiteral => "object / dict literal nested in another",
            Construct::Comment => "line or block comment",
            Construct::EmptyLineInBlock => "blank line inside an open block",
            Construct::Comprehension => "list comprehension",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|construct| construct.name() == name)
    }
}

impl Evaluate for Construct {
    fn evaluate(&self, text: &str) -> bool {
        let masked = mask_literals(text);
        let code = masked.code.as_str();
        match self {
            Construct::Function => JS_FUNCTION.is_match(code) || PY_FUNCTION.is_match(code),
            Construct::NestedFunction => {
                has_nested_brace_function(code) || has_nested_indented_def(code)
            }
            Construct::Class => CLASS.is_match(code),
            Construct::Async => ASYNC.is_match(code),
            Construct::Await => AWAIT.is_match(code),
            Construct::Loop => JS_LOOP.is_match(code) || PY_LOOP.is_match(code),
            Construct::Conditional => {
                JS_CONDITIONAL.is_match(code) || PY_CONDITIONAL.is_match(code)
            }
            Construct::Else => ELSE.is_match(code),
            Construct::TryCatch => TRY.is_match(code) && CATCH.is_match(code),
            Construct::TemplateLiteral => JS_TEMPLATE.is_match(text) || PY_FSTRING.is_match(text),
            Construct::ArrowFunction => ARROW.is_match(code),
            Construct::NestedObjectLiteral => has_nested_object_literal(code),
            Construct::Comment => masked.comments > 0,
            Construct::EmptyLineInBlock => has_empty_line_in_block(text, code),
            Construct::Comprehension => COMPREHENSION.is_match(code),
        }
    }
}

fn has_nested_brace_function(code: &str) -> bool {
    let starts: Vec<usize> = JS_FUNCTION.find_iter(code).map(|m| m.start()).collect();
    let bodies = JS_FUNCTION.find_iter(code).filter_map(|m| {
        let params_close = matching_delimiter(code, m.end() - 1)?;
        let open = params_close + code[params_close..].find('{')?;
        let close = matching_delimiter(code, open)?;
        Some((open, close))
    });

    for (open, close) in bodies {
        if starts.iter().any(|start| *start > open && *start < close) {
            return true;
        }
    }
    false
}

fn has_nested_indented_def(code: &str) -> bool {
    let mut open_defs: Vec<usize> = Vec::new();
    for line in code.lines().filter(|line| !line.trim().is_empty()) {
        let indent = indent_of(line);
        while open_defs.last().is_some_and(|outer| *outer >= indent) {
            open_defs.pop();
        }
        if PY_FUNCTION.is_match(line) {
            if !open_defs.is_empty() {
                return true;
            }
            open_defs.push(indent);
        }
    }
    false
}

fn has_nested_object_literal(code: &str) -> bool {
    let bytes = code.as_bytes();
    let mut stack: Vec<bool> = Vec::new();
    for (offset, b) in bytes.iter().enumerate() {
        match b {
            b'{' => {
                let is_object = opens_object_literal(&code[..offset]);
                if is_object && stack.last() == Some(&true) {
                    return true;
                }
                stack.push(is_object);
            }
            b'}' => {
                stack.pop();
            }
            _ => {}
        }
    }
    false
}

/// Whether a `{` following `prefix` starts an object/dict literal rather than a block.
fn opens_object_literal(prefix: &str) -> bool {
    let trimmed = prefix.trim_end();
    match trimmed.bytes().last() {
        Some(b':' | b'=' | b'(' | b',' | b'[') => true,
        Some(_) => match trimmed.strip_suffix("return") {
            Some(rest) => !rest
                .bytes()
                .last()
                .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$'),
            None => false,
        },
        None => false,
    }
}

fn has_empty_line_in_block(text: &str, code: &str) -> bool {
    let lines: Vec<(&str, &str)> = text.lines().zip(code.lines()).collect();
    let mut depth = 0i64;

    for (idx, (raw, masked)) in lines.iter().enumerate() {
        if raw.trim().is_empty() {
            if depth > 0 || between_indented_lines(&lines, idx) {
                return true;
            }
            continue;
        }
        for b in masked.bytes() {
            match b {
                b'{' => depth += 1,
                b'}' => depth -= 1,
                _ => {}
            }
        }
    }
    false
}

fn between_indented_lines(lines: &[(&str, &str)], idx: usize) -> bool {
    let code_line = |(_, masked): &&(&str, &str)| !masked.trim().is_empty();
    let before = lines[..idx].iter().rev().find(code_line);
    let after = lines[idx + 1..].iter().find(code_line);
    match (before, after) {
        (Some((_, before)), Some((_, after))) => indent_of(before) > 0 && indent_of(after) > 0,
        _ => false,
    }
}
