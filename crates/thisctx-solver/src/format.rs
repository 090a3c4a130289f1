//! Type formatting for diagnostic messages.

use crate::db::TypeDatabase;
use crate::types::*;

/// Renders types the way diagnostics print them.
///
/// Union members print non-nullish first, then `null`, then `undefined`,
/// which matches how users write optional types (`number | undefined`).
pub struct TypeFormatter<'a> {
    db: &'a dyn TypeDatabase,
    max_depth: u32,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        TypeFormatter { db, max_depth: 5 }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn format(&self, type_id: TypeId) -> String {
        self.format_at(type_id, 0)
    }

    fn format_at(&self, type_id: TypeId, depth: u32) -> String {
        if depth > self.max_depth {
            return "...".to_string();
        }
        if type_id == TypeId::NONE || type_id == TypeId::ERROR {
            return "error".to_string();
        }

        match self.db.lookup(type_id) {
            Some(TypeKey::Intrinsic(kind)) => kind.name().to_string(),
            Some(TypeKey::Literal(value)) => self.format_literal(&value),
            Some(TypeKey::Object(shape_id)) => self.format_object(shape_id, depth),
            Some(TypeKey::Union(list_id)) => self.format_union(list_id, depth),
            Some(TypeKey::Function(shape_id)) => {
                let shape = self.db.function_shape(shape_id);
                format!(
                    "({}) => {}",
                    self.format_params(&shape.params, depth),
                    self.format_at(shape.return_type, depth + 1)
                )
            }
            Some(TypeKey::Error) | None => "error".to_string(),
        }
    }

    fn format_literal(&self, value: &LiteralValue) -> String {
        match value {
            LiteralValue::String(atom) => format!("\"{}\"", self.db.resolve_atom_ref(*atom)),
            LiteralValue::Number(n) => format_number(n.0),
            LiteralValue::Boolean(b) => b.to_string(),
        }
    }

    fn format_object(&self, shape_id: ObjectShapeId, depth: u32) -> String {
        let shape = self.db.object_shape(shape_id);
        if shape.properties.is_empty() {
            return "{}".to_string();
        }

        let members: Vec<String> = shape
            .properties
            .iter()
            .map(|prop| self.format_member(prop, depth + 1))
            .collect();
        format!("{{ {} }}", members.join("; "))
    }

    fn format_member(&self, prop: &PropertyInfo, depth: u32) -> String {
        let name = self.db.resolve_atom_ref(prop.name);
        let optional = if prop.optional { "?" } else { "" };

        if prop.is_method
            && let Some(TypeKey::Function(shape_id)) = self.db.lookup(prop.type_id)
        {
            let shape = self.db.function_shape(shape_id);
            return format!(
                "{name}{optional}({}): {}",
                self.format_params(&shape.params, depth),
                self.format_at(shape.return_type, depth + 1)
            );
        }

        format!("{name}{optional}: {}", self.format_at(prop.type_id, depth))
    }

    fn format_params(&self, params: &[ParamInfo], depth: u32) -> String {
        params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                let name = match param.name {
                    Some(atom) => self.db.resolve_atom(atom),
                    None => format!("arg{i}"),
                };
                let rest = if param.rest { "..." } else { "" };
                let optional = if param.optional { "?" } else { "" };
                format!(
                    "{rest}{name}{optional}: {}",
                    self.format_at(param.type_id, depth + 1)
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn format_union(&self, list_id: TypeListId, depth: u32) -> String {
        let members = self.db.type_list(list_id);
        let mut ordered: Vec<TypeId> = members
            .iter()
            .copied()
            .filter(|m| !m.is_nullable())
            .collect();
        if members.contains(&TypeId::NULL) {
            ordered.push(TypeId::NULL);
        }
        if members.contains(&TypeId::UNDEFINED) {
            ordered.push(TypeId::UNDEFINED);
        }

        ordered
            .into_iter()
            .map(|member| {
                let text = self.format_at(member, depth + 1);
                if matches!(self.db.lookup(member), Some(TypeKey::Function(_))) {
                    format!("({text})")
                } else {
                    text
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Number literal text: integral values print without a fraction.
fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
