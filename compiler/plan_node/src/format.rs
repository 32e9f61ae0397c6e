//! Node formatting for diagnostics and error messages.

#![allow(clippy::format_push_string)] // Debug formatting prioritizes clarity over allocation

use crate::data::DataValue;
use crate::env::Environment;
use crate::id::{NodeId, RuntimeNode};
use crate::node::{BlockShape, CallableState, DataType, LiteralData, NodeData, TypeData};
use crate::stack::ensure_sufficient_stack;

impl Environment {
    /// Format a node on one line.
    ///
    /// Types print their full structure, e.g. `Struct<a:Int32,b:List<Utf8>>`.
    /// Literals print their kind and type, e.g. `List : List<Int32>`.
    pub fn format_node(&self, node: NodeId) -> String {
        let mut buf = String::new();
        match self.data(node) {
            NodeData::Type(_) => self.format_type_into(node, &mut buf),
            NodeData::Literal(_) => {
                buf.push_str(self.kind_of(node).name());
                buf.push_str(" : ");
                self.format_type_into(self.type_of(node), &mut buf);
            }
        }
        buf
    }

    /// Like [`Environment::format_node`], but literals print their value,
    /// e.g. `[42, 7] : List<Int32>`.
    pub fn format_node_verbose(&self, node: NodeId) -> String {
        let mut buf = String::new();
        match self.data(node) {
            NodeData::Type(_) => self.format_type_into(node, &mut buf),
            NodeData::Literal(_) => {
                self.format_value_into(node, &mut buf);
                buf.push_str(" : ");
                self.format_type_into(self.type_of(node), &mut buf);
            }
        }
        buf
    }

    fn format_list_into(&self, items: &[NodeId], buf: &mut String) {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                buf.push(',');
            }
            self.format_type_into(item, buf);
        }
    }

    fn format_wrapped_into(&self, name: &str, item: NodeId, buf: &mut String) {
        buf.push_str(name);
        buf.push('<');
        self.format_type_into(item, buf);
        buf.push('>');
    }

    fn format_type_into(&self, ty: NodeId, buf: &mut String) {
        ensure_sufficient_stack(|| self.format_type_inner(ty, buf));
    }

    fn format_type_inner(&self, ty: NodeId, buf: &mut String) {
        let Some(data) = self.as_type(ty) else {
            buf.push_str("<literal>");
            return;
        };
        match data {
            TypeData::TypeOfType
            | TypeData::Void
            | TypeData::Null
            | TypeData::EmptyList
            | TypeData::EmptyDict
            | TypeData::Any => buf.push_str(data.kind().name()),

            TypeData::Data(DataType::Plain(slot)) => buf.push_str(slot.name()),
            TypeData::Data(DataType::Decimal { precision, scale }) => {
                buf.push_str(&format!("Decimal({precision},{scale})"));
            }

            TypeData::Struct(members) => {
                buf.push_str("Struct<");
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        buf.push(',');
                    }
                    buf.push_str(self.name_str(member.name));
                    buf.push(':');
                    self.format_type_into(member.ty, buf);
                }
                buf.push('>');
            }
            TypeData::Tuple(elements) => {
                buf.push_str("Tuple<");
                self.format_list_into(elements, buf);
                buf.push('>');
            }

            TypeData::List(item) => self.format_wrapped_into("List", *item, buf),
            TypeData::Stream(item) => self.format_wrapped_into("Stream", *item, buf),
            TypeData::Flow(item) => self.format_wrapped_into("Flow", *item, buf),
            TypeData::Optional(item) => self.format_wrapped_into("Optional", *item, buf),
            TypeData::Variant(item) => self.format_wrapped_into("Variant", *item, buf),

            TypeData::Tagged { base, tag } => {
                buf.push_str("Tagged<");
                self.format_type_into(*base, buf);
                buf.push_str(",'");
                buf.push_str(self.name_str(*tag));
                buf.push_str("'>");
            }
            TypeData::Block { item, shape } => {
                buf.push_str("Block<");
                self.format_type_into(*item, buf);
                buf.push_str(match shape {
                    BlockShape::Scalar => ",Scalar>",
                    BlockShape::Many => ",Many>",
                });
            }
            TypeData::Dict { key, payload } => {
                buf.push_str("Dict<");
                self.format_type_into(*key, buf);
                buf.push(',');
                self.format_type_into(*payload, buf);
                buf.push('>');
            }
            TypeData::Resource { tag } => {
                buf.push_str("Resource<");
                buf.push_str(self.name_str(*tag));
                buf.push('>');
            }

            // Callable<Name(req,[opt])->ret>
            TypeData::Callable(c) => {
                buf.push_str("Callable<");
                buf.push_str(self.name_str(c.name));
                buf.push('(');
                let required = c.required_args();
                for (i, &arg) in c.arguments.iter().enumerate() {
                    if i > 0 {
                        buf.push(',');
                    }
                    if i == required {
                        buf.push('[');
                    }
                    self.format_type_into(arg, buf);
                }
                if required < c.arguments.len() {
                    buf.push(']');
                }
                buf.push_str(")->");
                self.format_type_into(c.return_type, buf);
                if c.merge_disabled {
                    buf.push_str(",nomerge");
                }
                buf.push('>');
            }
        }
    }

    fn format_runtime_into(&self, rn: RuntimeNode, buf: &mut String) {
        if !rn.is_immediate() {
            buf.push('&');
        }
        self.format_value_into(rn.node(), buf);
    }

    fn format_runtime_list_into(&self, items: &[RuntimeNode], buf: &mut String) {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            self.format_runtime_into(item, buf);
        }
    }

    fn format_value_into(&self, node: NodeId, buf: &mut String) {
        ensure_sufficient_stack(|| self.format_value_inner(node, buf));
    }

    fn format_value_inner(&self, node: NodeId, buf: &mut String) {
        let Some(literal) = self.as_literal(node) else {
            self.format_type_into(node, buf);
            return;
        };
        match literal {
            LiteralData::Void => buf.push_str("void"),
            LiteralData::Null => buf.push_str("null"),
            LiteralData::EmptyList => buf.push_str("[]"),
            LiteralData::EmptyDict => buf.push_str("{}"),
            LiteralData::Data(value) => self.format_data_into(node, value, buf),
            LiteralData::Struct(items) => {
                buf.push('{');
                let members = self.struct_members(self.type_of(node)).unwrap_or(&[]);
                for (i, (&item, member)) in items.iter().zip(members).enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    buf.push_str(self.name_str(member.name));
                    buf.push_str(": ");
                    self.format_runtime_into(item, buf);
                }
                buf.push('}');
            }
            LiteralData::List(items) => {
                buf.push('[');
                self.format_runtime_list_into(items, buf);
                buf.push(']');
            }
            LiteralData::Tuple(items) => {
                buf.push('(');
                self.format_runtime_list_into(items, buf);
                buf.push(')');
            }
            LiteralData::Optional(None) => buf.push_str("None"),
            LiteralData::Optional(Some(item)) => {
                buf.push_str("Some(");
                self.format_runtime_into(*item, buf);
                buf.push(')');
            }
            LiteralData::Any(item) => {
                buf.push_str("Any(");
                if let Some(item) = item {
                    self.format_runtime_into(*item, buf);
                }
                buf.push(')');
            }
            LiteralData::Dict(entries) => {
                buf.push('{');
                for (i, &(key, payload)) in entries.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_runtime_into(key, buf);
                    buf.push_str(": ");
                    self.format_runtime_into(payload, buf);
                }
                buf.push('}');
            }
            LiteralData::Variant { item, index } => {
                buf.push_str(&format!("Variant({index}: "));
                self.format_runtime_into(*item, buf);
                buf.push(')');
            }
            LiteralData::Callable(c) => {
                let name = self.callable_name(self.type_of(node)).unwrap_or("?");
                buf.push_str(name);
                if c.unique_id != 0 {
                    buf.push_str(&format!("#{}", c.unique_id));
                }
                match &c.state {
                    CallableState::Pending { inputs } => {
                        buf.push('(');
                        self.format_runtime_list_into(inputs, buf);
                        buf.push(')');
                    }
                    CallableState::Resolved { result } => {
                        buf.push_str(" => ");
                        self.format_runtime_into(*result, buf);
                    }
                }
            }
        }
    }

    fn format_data_into(&self, node: NodeId, value: &DataValue, buf: &mut String) {
        match (value, self.as_type(self.type_of(node))) {
            (
                DataValue::Decimal(v),
                Some(TypeData::Data(DataType::Decimal { scale, .. })),
            ) => buf.push_str(&format_decimal(*v, *scale)),
            _ => buf.push_str(&value.to_string()),
        }
    }
}

/// Render an unscaled decimal with `scale` fractional digits.
fn format_decimal(value: i128, scale: u8) -> String {
    let digits = value.unsigned_abs().to_string();
    let scale = usize::from(scale);
    let sign = if value < 0 { "-" } else { "" };
    if scale == 0 {
        return format!("{sign}{digits}");
    }
    let padded = format!("{digits:0>width$}", width = scale + 1);
    let (int, frac) = padded.split_at(padded.len() - scale);
    format!("{sign}{int}.{frac}")
}
