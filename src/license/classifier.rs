use serde::Serialize;

use crate::license::spdx::{lookup, normalize, tier_of, UNKNOWN};
use crate::models::Rating;

/// Normalized license label together with its risk tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub license: String,
    pub rating: Rating,
}

impl Classification {
    fn unknown() -> Self {
        Classification {
            license: UNKNOWN.to_string(),
            rating: Rating::Risky,
        }
    }
}

/// Classify a raw license string into a normalized label and a [`Rating`].
///
/// Handles:
/// - SPDX identifiers and common spellings (`MIT`, `Apache License, Version 2.0`)
/// - whole license texts that name their license
/// - SPDX expressions: `OR` → most permissive wins, `AND` → most restrictive wins,
///   `AND` binds tighter than `OR`, `WITH` exceptions are ignored for rating
/// - `A/B` shorthand for `A OR B`
/// - empty / unknown → `Unknown`, Risky
pub fn classify(raw: &str) -> Classification {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Classification::unknown();
    }

    // "MIT/Apache-2.0", but not "https://www.apache.org/licenses/LICENSE-2.0"
    let expr = if !collapsed.contains(' ')
        && collapsed.contains('/')
        && collapsed.split('/').all(|part| lookup(part).is_some())
    {
        collapsed.replace('/', " OR ")
    } else {
        collapsed
    };

    let tokens = tokenize(&expr);
    let node = if is_expression(&tokens) {
        ExprParser { tokens, pos: 0 }.parse_or()
    } else {
        classify_atom(&expr)
    };

    if node.known {
        Classification {
            license: node.label,
            rating: node.rating,
        }
    } else {
        Classification::unknown()
    }
}

/// True when `tokens` read as an SPDX expression rather than prose that happens
/// to contain an uppercase `AND`/`OR`/`WITH`.
///
/// Every license operand must be a known name or a single identifier-shaped word.
/// The operand after `WITH` is an exception id and is not checked.
fn is_expression(tokens: &[Token]) -> bool {
    if !tokens.iter().any(Token::is_operator) {
        return false;
    }
    tokens.iter().enumerate().all(|(i, token)| match token {
        Token::Name(_) if i > 0 && tokens[i - 1] == Token::With => true,
        Token::Name(name) => lookup(name).is_some() || is_identifier_shaped(name),
        _ => true,
    })
}

fn is_identifier_shaped(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '+' | ':'))
}

/// Intermediate result for a sub-expression.
#[derive(Debug, Clone)]
struct Node {
    label: String,
    rating: Rating,
    known: bool,
}

fn classify_atom(name: &str) -> Node {
    match normalize(name) {
        Some(id) => Node {
            label: id.to_string(),
            rating: tier_of(id).unwrap_or(Rating::Risky),
            known: id != UNKNOWN,
        },
        None => Node {
            label: UNKNOWN.to_string(),
            rating: Rating::Risky,
            known: false,
        },
    }
}

fn combine(lhs: Node, op: &str, rhs: Node) -> Node {
    let rating = match op {
        "OR" if lhs.rating.severity() <= rhs.rating.severity() => lhs.rating,
        "OR" => rhs.rating,
        _ if lhs.rating.severity() >= rhs.rating.severity() => lhs.rating,
        _ => rhs.rating,
    };
    Node {
        label: format!("{} {} {}", lhs.label, op, rhs.label),
        rating,
        known: lhs.known || rhs.known,
    }
}

#[derive(Debug, PartialEq, Clone)]
enum Token {
    /// One or more consecutive words forming a license name.
    Name(String),
    And,
    Or,
    With,
    LParen,
    RParen,
}

impl Token {
    fn is_operator(&self) -> bool {
        matches!(self, Token::And | Token::Or | Token::With)
    }
}

fn tokenize(expr: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '(' {
            tokens.push(Token::LParen);
            chars.next();
            continue;
        }
        if c == ')' {
            tokens.push(Token::RParen);
            chars.next();
            continue;
        }

        let mut word = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '(' || c == ')' {
                break;
            }
            word.push(c);
            chars.next();
        }
        let operator = match word.as_str() {
            "AND" => Some(Token::And),
            "OR" => Some(Token::Or),
            "WITH" => Some(Token::With),
            _ => None,
        };
        if let Some(op) = operator {
            tokens.push(op);
        } else if let Some(Token::Name(name)) = tokens.last_mut() {
            name.push(' ');
            name.push_str(&word);
        } else {
            tokens.push(Token::Name(word));
        }
    }
    tokens
}

/// Recursive descent over the token stream.
///
/// ```text
/// or_expr  := and_expr ( "OR" and_expr )*
/// and_expr := atom ( "AND" atom )*
/// atom     := "(" or_expr ")" | name ( "WITH" name )?
/// ```
struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn parse_or(&mut self) -> Node {
        let mut result = self.parse_and();
        while matches!(self.peek(), Some(Token::Or)) {
            self.consume();
            let rhs = self.parse_and();
            result = combine(result, "OR", rhs);
        }
        result
    }

    fn parse_and(&mut self) -> Node {
        let mut result = self.parse_atom();
        while matches!(self.peek(), Some(Token::And)) {
            self.consume();
            let rhs = self.parse_atom();
            result = combine(result, "AND", rhs);
        }
        result
    }

    fn parse_atom(&mut self) -> Node {
        match self.peek() {
            Some(Token::LParen) => {
                self.consume();
                let mut inner = self.parse_or();
                if matches!(self.peek(), Some(Token::RParen)) {
                    self.consume();
                }
                inner.label = format!("({})", inner.label);
                inner
            }
            Some(Token::Name(_)) => {
                let Some(Token::Name(name)) = self.consume() else {
                    return classify_atom("");
                };
                let mut node = classify_atom(&name);
                if matches!(self.peek(), Some(Token::With)) {
                    self.consume();
                    if let Some(Token::Name(exception)) = self.peek().cloned() {
                        self.consume();
                        node.label = format!("{} WITH {}", node.label, exception);
                    }
                }
                node
            }
            _ => classify_atom(""),
        }
    }
}
