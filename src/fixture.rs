#![allow(clippy::upper_case_acronyms)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use pest::{
    error::{Error as PestError, ErrorVariant},
    iterators::Pair,
    Parser, RuleType, Span,
};

use crate::{
    resource::{ResourceError, ResourceTable},
    value::Value,
};

pub type ParseResult<T> = Result<T, PestError<Rule>>;

pub const BUILTIN: &str = include_str!("../fixtures/pow_variation.fix");
const BUILTIN_NAME: &str = "pow_variation.fix";

/// An operand as written in a fixture, before any resource is acquired
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Vec<u8>),
    List(Vec<Literal>),
    Object(String),
    Resource(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub origin: Option<PathBuf>,
    pub base: Option<Literal>,
    pub operands: Vec<Literal>,
}

impl Fixture {
    /// The standard pow usage variation list.
    ///
    /// Its resource opens the shipped fixture file, or the running executable
    /// when the source tree is not around.
    pub fn builtin() -> ParseResult<Self> {
        Self::builtin_at(
            Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("fixtures")
                .join(BUILTIN_NAME),
        )
    }
    fn builtin_at(origin: PathBuf) -> ParseResult<Self> {
        let mut fixture = parse(BUILTIN)?;
        if !origin.exists() {
            if let Ok(exe) = std::env::current_exe() {
                let own = Literal::Resource(BUILTIN_NAME.into());
                for operand in &mut fixture.operands {
                    if *operand == own {
                        *operand = Literal::Resource(exe.clone());
                    }
                }
            }
        }
        fixture.origin = Some(origin);
        Ok(fixture)
    }
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let input = fs::read_to_string(path)
            .with_context(|| format!("Unable to read fixture {}", path.display()))?;
        let mut fixture = parse(&input).map_err(|e| e.with_path(&path.to_string_lossy()))?;
        fixture.origin = Some(path.to_path_buf());
        Ok(fixture)
    }
    /// Directory that relative resource paths are resolved against
    pub fn resource_root(&self) -> PathBuf {
        self.origin
            .as_ref()
            .and_then(|origin| origin.parent())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Turns literals into values, acquiring resources from a table
pub struct Materializer<'a> {
    resources: &'a mut ResourceTable,
    root: PathBuf,
    next_object: u32,
}

impl<'a> Materializer<'a> {
    pub fn new<P>(resources: &'a mut ResourceTable, root: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Materializer {
            resources,
            root: root.into(),
            next_object: 1,
        }
    }
    pub fn value(&mut self, literal: &Literal) -> Result<Value, ResourceError> {
        Ok(match literal {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(i) => Value::Int(*i),
            Literal::Float(f) => Value::Float(*f),
            Literal::Str(bytes) => Value::string(bytes),
            Literal::List(items) => Value::list(
                items
                    .iter()
                    .map(|item| self.value(item))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Literal::Object(class) => {
                let id = self.next_object;
                self.next_object += 1;
                Value::object(class.as_str(), id)
            }
            Literal::Resource(path) => {
                let path = if path.is_relative() {
                    self.root.join(path)
                } else {
                    path.clone()
                };
                Value::Resource(self.resources.open(path)?)
            }
        })
    }
}

fn only<R>(pair: Pair<R>) -> Pair<R>
where
    R: RuleType,
{
    pair.into_inner().next().unwrap()
}

fn child<R>(pair: Pair<R>, rule: R) -> Pair<R>
where
    R: RuleType,
{
    pair.into_inner().find(|p| p.as_rule() == rule).unwrap()
}

fn custom_error(span: Span, message: String) -> PestError<Rule> {
    PestError::new_from_span(ErrorVariant::CustomError { message }, span)
}

#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
struct FixtureParser;

pub fn parse(input: &str) -> ParseResult<Fixture> {
    let pair = FixtureParser::parse(Rule::fixture, input)?.next().unwrap();
    let mut base = None;
    let mut operands = Vec::new();
    for pair in pair.into_inner() {
        match pair.as_rule() {
            Rule::base_decl => base = Some(parse_value(child(pair, Rule::value))?),
            Rule::values => {
                for pair in pair.into_inner() {
                    operands.push(parse_value(pair)?);
                }
            }
            Rule::EOI => {}
            rule => unreachable!("{:?}", rule),
        }
    }
    Ok(Fixture {
        origin: None,
        base,
        operands,
    })
}

/// Parse a single literal, such as one given on the command line
pub fn parse_literal(input: &str) -> ParseResult<Literal> {
    let pair = FixtureParser::parse(Rule::single, input)?.next().unwrap();
    parse_value(child(pair, Rule::value))
}

fn parse_value(pair: Pair<Rule>) -> ParseResult<Literal> {
    let pair = only(pair);
    Ok(match pair.as_rule() {
        Rule::float => Literal::Float(
            pair.as_str()
                .parse()
                .map_err(|e| custom_error(pair.as_span(), format!("Invalid float: {}", e)))?,
        ),
        // Integers too large for an i64 become floats
        Rule::int => match pair.as_str().parse() {
            Ok(i) => Literal::Int(i),
            Err(_) => Literal::Float(pair.as_str().parse().map_err(|e| {
                custom_error(pair.as_span(), format!("Invalid number: {}", e))
            })?),
        },
        Rule::null => Literal::Null,
        Rule::bool_literal => Literal::Bool(pair.as_str().eq_ignore_ascii_case("true")),
        Rule::string => Literal::Str(parse_string(pair)),
        Rule::list => {
            let mut items = Vec::new();
            for pair in pair.into_inner() {
                items.push(parse_value(pair)?);
            }
            Literal::List(items)
        }
        Rule::object => Literal::Object(child(pair, Rule::ident).as_str().into()),
        Rule::resource => {
            let path = parse_string(child(pair, Rule::string));
            Literal::Resource(String::from_utf8_lossy(&path).into_owned().into())
        }
        rule => unreachable!("{:?}", rule),
    })
}

fn parse_string(pair: Pair<Rule>) -> Vec<u8> {
    let pair = only(pair);
    let mut s = Vec::new();
    match pair.as_rule() {
        Rule::dq_string => {
            for pair in pair.into_inner() {
                match pair.as_rule() {
                    Rule::dq_raw => s.extend_from_slice(pair.as_str().as_bytes()),
                    Rule::escape => match only(pair).as_str() {
                        "n" => s.push(b'\n'),
                        "r" => s.push(b'\r'),
                        "t" => s.push(b'\t'),
                        "0" => s.push(0),
                        "\\" => s.push(b'\\'),
                        "\"" => s.push(b'"'),
                        "$" => s.push(b'$'),
                        other => {
                            s.push(b'\\');
                            s.extend_from_slice(other.as_bytes());
                        }
                    },
                    rule => unreachable!("{:?}", rule),
                }
            }
        }
        Rule::sq_string => {
            let mut chars = only(pair).as_str().chars().peekable();
            let mut buf = [0; 4];
            while let Some(c) = chars.next() {
                let c = match (c, chars.peek()) {
                    ('\\', Some(&next)) if next == '\'' || next == '\\' => {
                        chars.next();
                        next
                    }
                    _ => c,
                };
                s.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
        rule => unreachable!("{:?}", rule),
    }
    s
}
