//! Diagnostic records produced by the checker.
//!
//! Codes and message templates follow the TypeScript numbering so results
//! can be compared against `tsc` baselines. Templates use `{0}`, `{1}`, ...
//! placeholders filled in by `format_message`.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const AN_OBJECT_LITERAL_CANNOT_HAVE_MULTIPLE_PROPERTIES_WITH_THE_SAME_NAME: u32 = 1117;
    pub const DUPLICATE_IDENTIFIER: u32 = 2300;
    pub const CANNOT_FIND_NAME: u32 = 2304;
    pub const PROPERTY_DOES_NOT_EXIST_ON_TYPE: u32 = 2339;
    pub const THIS_EXPRESSION_IS_NOT_CALLABLE: u32 = 2349;
    pub const EXPECTED_ARGUMENTS_BUT_GOT: u32 = 2554;
    pub const THIS_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_IT_DOES_NOT_HAVE_A_TYPE_ANNOTATION: u32 = 2683;
    pub const PARAMETER_IMPLICITLY_HAS_AN_ANY_TYPE: u32 = 7006;
    pub const IS_POSSIBLY_NULL: u32 = 18047;
    pub const IS_POSSIBLY_UNDEFINED: u32 = 18048;
    pub const IS_POSSIBLY_NULL_OR_UNDEFINED: u32 = 18049;
    pub const OBJECT_IS_POSSIBLY_NULL: u32 = 2531;
    pub const OBJECT_IS_POSSIBLY_UNDEFINED: u32 = 2532;
    pub const OBJECT_IS_POSSIBLY_NULL_OR_UNDEFINED: u32 = 2533;
    pub const OPERATOR_CANNOT_BE_APPLIED_TO_TYPES_AND: u32 = 2365;
    pub const EXPECTED_AT_LEAST_ARGUMENTS_BUT_GOT: u32 = 2555;
    pub const IS_OF_TYPE_UNKNOWN: u32 = 18046;
    pub const THE_VALUE_CANNOT_BE_USED_HERE: u32 = 18050;
}

pub mod diagnostic_messages {
    pub const AN_OBJECT_LITERAL_CANNOT_HAVE_MULTIPLE_PROPERTIES_WITH_THE_SAME_NAME: &str =
        "An object literal cannot have multiple properties with the same name.";
    pub const DUPLICATE_IDENTIFIER: &str = "Duplicate identifier '{0}'.";
    pub const CANNOT_FIND_NAME: &str = "Cannot find name '{0}'.";
    pub const PROPERTY_DOES_NOT_EXIST_ON_TYPE: &str = "Property '{0}' does not exist on type '{1}'.";
    pub const THIS_EXPRESSION_IS_NOT_CALLABLE: &str =
        "This expression is not callable. Type '{0}' has no call signatures.";
    pub const EXPECTED_ARGUMENTS_BUT_GOT: &str = "Expected {0} arguments, but got {1}.";
    pub const THIS_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_IT_DOES_NOT_HAVE_A_TYPE_ANNOTATION: &str =
        "'this' implicitly has type 'any' because it does not have a type annotation.";
    pub const PARAMETER_IMPLICITLY_HAS_AN_ANY_TYPE: &str =
        "Parameter '{0}' implicitly has an '{1}' type.";
    pub const IS_POSSIBLY_NULL: &str = "'{0}' is possibly 'null'.";
    pub const IS_POSSIBLY_UNDEFINED: &str = "'{0}' is possibly 'undefined'.";
    pub const IS_POSSIBLY_NULL_OR_UNDEFINED: &str = "'{0}' is possibly 'null' or 'undefined'.";
    pub const OBJECT_IS_POSSIBLY_NULL: &str = "Object is possibly 'null'.";
    pub const OBJECT_IS_POSSIBLY_UNDEFINED: &str = "Object is possibly 'undefined'.";
    pub const OBJECT_IS_POSSIBLY_NULL_OR_UNDEFINED: &str = "Object is possibly 'null' or 'undefined'.";
    pub const OPERATOR_CANNOT_BE_APPLIED_TO_TYPES_AND: &str = "Operator '{0}' cannot be applied to types '{1}' and '{2}'.";
    pub const EXPECTED_AT_LEAST_ARGUMENTS_BUT_GOT: &str = "Expected at least {0} arguments, but got {1}.";
    pub const IS_OF_TYPE_UNKNOWN: &str = "'{0}' is of type 'unknown'.";
    pub const THE_VALUE_CANNOT_BE_USED_HERE: &str = "The value '{0}' cannot be used here.";
}

/// Every diagnostic the checker can emit.
pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::AN_OBJECT_LITERAL_CANNOT_HAVE_MULTIPLE_PROPERTIES_WITH_THE_SAME_NAME,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AN_OBJECT_LITERAL_CANNOT_HAVE_MULTIPLE_PROPERTIES_WITH_THE_SAME_NAME,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DUPLICATE_IDENTIFIER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DUPLICATE_IDENTIFIER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_FIND_NAME,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_FIND_NAME,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::THIS_EXPRESSION_IS_NOT_CALLABLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::THIS_EXPRESSION_IS_NOT_CALLABLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_ARGUMENTS_BUT_GOT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_ARGUMENTS_BUT_GOT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::THIS_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_IT_DOES_NOT_HAVE_A_TYPE_ANNOTATION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::THIS_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_IT_DOES_NOT_HAVE_A_TYPE_ANNOTATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PARAMETER_IMPLICITLY_HAS_AN_ANY_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PARAMETER_IMPLICITLY_HAS_AN_ANY_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::IS_POSSIBLY_NULL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::IS_POSSIBLY_NULL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::IS_POSSIBLY_UNDEFINED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::IS_POSSIBLY_UNDEFINED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::IS_POSSIBLY_NULL_OR_UNDEFINED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::IS_POSSIBLY_NULL_OR_UNDEFINED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::OBJECT_IS_POSSIBLY_NULL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::OBJECT_IS_POSSIBLY_NULL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::OBJECT_IS_POSSIBLY_UNDEFINED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::OBJECT_IS_POSSIBLY_UNDEFINED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::OBJECT_IS_POSSIBLY_NULL_OR_UNDEFINED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::OBJECT_IS_POSSIBLY_NULL_OR_UNDEFINED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::OPERATOR_CANNOT_BE_APPLIED_TO_TYPES_AND,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::OPERATOR_CANNOT_BE_APPLIED_TO_TYPES_AND,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_AT_LEAST_ARGUMENTS_BUT_GOT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_AT_LEAST_ARGUMENTS_BUT_GOT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::IS_OF_TYPE_UNKNOWN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::IS_OF_TYPE_UNKNOWN,
    },
    DiagnosticMessage {
        code: diagnostic_codes::THE_VALUE_CANNOT_BE_USED_HERE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::THE_VALUE_CANNOT_BE_USED_HERE,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRelatedInformation {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
            related_information: Vec::new(),
        }
    }

    pub fn with_related(
        mut self,
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            category: DiagnosticCategory::Message,
            code: 0,
            file: file.into(),
            start,
            length,
            message_text: message.into(),
        });
        self
    }

    /// `error TS2339: Property 'z' does not exist on type '...'.`
    pub fn format_simple(&self) -> String {
        let category = match self.category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        format!("{category} TS{}: {}", self.code, self.message_text)
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_fills_placeholders() {
        let message = format_message(
            diagnostic_messages::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
            &["z", "{ x: number }"],
        );
        assert_eq!(message, "Property 'z' does not exist on type '{ x: number }'.");
    }

    #[test]
    fn test_every_code_has_a_template() {
        for code in [
            diagnostic_codes::DUPLICATE_IDENTIFIER,
            diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
            diagnostic_codes::EXPECTED_ARGUMENTS_BUT_GOT,
            diagnostic_codes::IS_POSSIBLY_UNDEFINED,
        ] {
            assert!(get_message_template(code).is_some(), "missing template for {code}");
        }
        assert!(get_message_template(1).is_none());
    }

    #[test]
    fn test_format_simple() {
        let diag = Diagnostic::error("test.ts", 4, 1, "Cannot find name 'q'.", 2304);
        assert_eq!(diag.format_simple(), "error TS2304: Cannot find name 'q'.");
        let diag = diag.with_related("test.ts", 0, 1, "declared here");
        assert_eq!(diag.related_information.len(), 1);
    }
}
