use std::rc::Rc;

use derive_more::Display;
use rpds::Vector;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<[u8]>),
    List(Vector<Value>),
    Object(Object),
    Resource(ResourceHandle),
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    #[display(fmt = "null")]
    Null,
    #[display(fmt = "bool")]
    Bool,
    #[display(fmt = "int")]
    Int,
    #[display(fmt = "float")]
    Float,
    #[display(fmt = "string")]
    Str,
    #[display(fmt = "array")]
    List,
    #[display(fmt = "object")]
    Object,
    #[display(fmt = "resource")]
    Resource,
}

/// An object instance. Only its identity is observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub class: Rc<str>,
    pub id: u32,
}

/// An opaque handle minted by a [`ResourceTable`](crate::resource::ResourceTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    pub id: u32,
    pub type_name: &'static str,
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::List(_) => Kind::List,
            Value::Object(_) => Kind::Object,
            Value::Resource(_) => Kind::Resource,
        }
    }
    pub fn string<S>(s: S) -> Self
    where
        S: AsRef<[u8]>,
    {
        Value::Str(s.as_ref().into())
    }
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::List(items.into_iter().collect())
    }
    pub fn object<C>(class: C, id: u32) -> Self
    where
        C: Into<Rc<str>>,
    {
        Value::Object(Object {
            class: class.into(),
            id,
        })
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<ResourceHandle> for Value {
    fn from(handle: ResourceHandle) -> Self {
        Value::Resource(handle)
    }
}
