//! Arithmetic expression evaluator for formula cells.
//!
//! After cell references have been substituted, a formula is a plain
//! arithmetic expression over decimal numbers. This module tokenizes and
//! evaluates it with a small recursive-descent parser:
//!
//! ```text
//! expr    := term   (('+' | '-') term)*
//! term    := unary  (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Anything outside that grammar is an error; the resolver turns errors into
//! a fallback to the raw formula text.

/// Nesting limit for parentheses and unary signs.
const MAX_NESTING: usize = 64;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormulaError {
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("Invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Unexpected token {0}")]
    UnexpectedToken(String),

    #[error("Expression nested too deeply")]
    TooDeep,

    #[error("Expression does not evaluate to a finite number")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(self) -> String {
        match self {
            Token::Number(n) => format!("number {n}"),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Star => "'*'".into(),
            Token::Slash => "'/'".into(),
            Token::LParen => "'('".into(),
            Token::RParen => "')'".into(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        literal.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| FormulaError::InvalidNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(FormulaError::UnexpectedChar { ch: other, offset }),
        };
        tokens.push(token);
        chars.next();
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(FormulaError::TooDeep);
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            if op == Token::Plus {
                value += rhs;
            } else {
                value -= rhs;
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            if op == Token::Star {
                value *= rhs;
            } else {
                value /= rhs;
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, FormulaError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary();
                self.depth -= 1;
                value
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary().map(|v| -v);
                self.depth -= 1;
                value
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, FormulaError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(FormulaError::UnexpectedToken(other.describe())),
                    None => Err(FormulaError::UnexpectedEnd),
                }
            }
            Some(other) => Err(FormulaError::UnexpectedToken(other.describe())),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression of numbers, `+ - * /` and parentheses.
pub fn evaluate(expression: &str) -> Result<f64, FormulaError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };

    let value = parser.expr()?;
    if let Some(trailing) = parser.peek() {
        return Err(FormulaError::UnexpectedToken(trailing.describe()));
    }
    if !value.is_finite() {
        return Err(FormulaError::NonFinite);
    }
    Ok(value)
}
