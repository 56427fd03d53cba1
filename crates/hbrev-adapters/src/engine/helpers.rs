//! Built-in helper set.
//!
//! Simple value helpers are declared with `handlebars_helper!`. Arithmetic
//! needs to keep integers integral, so it gets its own `HelperDef`.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, RenderErrorReason,
    ScopedJson, handlebars_helper,
};
use serde_json::{Number, Value as Json};

use super::repeat::RepeatHelper;

/// Every helper this module registers, in registration order.
pub const HELPER_NAMES: &[&str] = &[
    "uppercase",
    "lowercase",
    "capitalize",
    "trim",
    "replace",
    "append",
    "prepend",
    "truncate",
    "add",
    "subtract",
    "multiply",
    "divide",
    "floor",
    "ceil",
    "join",
    "first",
    "last",
    "default",
    "json",
    "repeat",
];

pub(super) fn register_all(registry: &mut Handlebars<'_>) {
    registry.register_helper("uppercase", Box::new(uppercase));
    registry.register_helper("lowercase", Box::new(lowercase));
    registry.register_helper("capitalize", Box::new(capitalize));
    registry.register_helper("trim", Box::new(trim));
    registry.register_helper("replace", Box::new(replace));
    registry.register_helper("append", Box::new(append));
    registry.register_helper("prepend", Box::new(prepend));
    registry.register_helper("truncate", Box::new(truncate));

    registry.register_helper("add", Box::new(Arithmetic::Add));
    registry.register_helper("subtract", Box::new(Arithmetic::Subtract));
    registry.register_helper("multiply", Box::new(Arithmetic::Multiply));
    registry.register_helper("divide", Box::new(Arithmetic::Divide));
    registry.register_helper("floor", Box::new(floor));
    registry.register_helper("ceil", Box::new(ceil));

    registry.register_helper("join", Box::new(join));
    registry.register_helper("first", Box::new(first));
    registry.register_helper("last", Box::new(last));

    registry.register_helper("default", Box::new(default_value));
    registry.register_helper("json", Box::new(json));

    registry.register_helper("repeat", Box::new(RepeatHelper));
}

// -----------------------------------------------------------------------------
// Strings
// -----------------------------------------------------------------------------

handlebars_helper!(uppercase: |s: str| s.to_uppercase());
handlebars_helper!(lowercase: |s: str| s.to_lowercase());
handlebars_helper!(capitalize: |s: str| {
    let mut chars = s.chars();
    match chars.next() {
        Some(head) => head.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    }
});
handlebars_helper!(trim: |s: str| s.trim().to_owned());
handlebars_helper!(replace: |s: str, from: str, to: str| s.replace(from, to));
handlebars_helper!(append: |s: str, suffix: str| format!("{s}{suffix}"));
handlebars_helper!(prepend: |s: str, prefix: str| format!("{prefix}{s}"));
handlebars_helper!(truncate: |s: str, limit: u64| {
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    s.chars().take(limit).collect::<String>()
});

// -----------------------------------------------------------------------------
// Math
// -----------------------------------------------------------------------------

handlebars_helper!(floor: |v: f64| number(v.floor()));
handlebars_helper!(ceil: |v: f64| number(v.ceil()));

/// Binary arithmetic. Integer operands give an integer result whenever the
/// result is exact; otherwise the float result is returned.
#[derive(Debug, Clone, Copy)]
enum Arithmetic {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Arithmetic {
    fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    fn apply(self, a: &Json, b: &Json) -> Result<Json, RenderError> {
        if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
            let exact = match self {
                Self::Add => x.checked_add(y),
                Self::Subtract => x.checked_sub(y),
                Self::Multiply => x.checked_mul(y),
                Self::Divide if y == 0 => return Err(division_by_zero()),
                Self::Divide if x.checked_rem(y) == Some(0) => x.checked_div(y),
                Self::Divide => None,
            };
            if let Some(value) = exact {
                return Ok(Json::from(value));
            }
        }

        let x = operand(self.name(), a)?;
        let y = operand(self.name(), b)?;
        let result = match self {
            Self::Add => x + y,
            Self::Subtract => x - y,
            Self::Multiply => x * y,
            Self::Divide if y == 0.0 => return Err(division_by_zero()),
            Self::Divide => x / y,
        };
        Ok(number(result))
    }
}

impl HelperDef for Arithmetic {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let a = param(h, self.name(), 0)?;
        let b = param(h, self.name(), 1)?;
        self.apply(a, b).map(ScopedJson::Derived)
    }
}

fn param<'a>(h: &'a Helper<'_>, helper: &'static str, index: usize) -> Result<&'a Json, RenderError> {
    h.param(index)
        .map(|p| p.value())
        .ok_or_else(|| RenderErrorReason::ParamNotFoundForIndex(helper, index).into())
}

/// Numbers, and strings that parse as numbers.
fn operand(helper: &str, value: &Json) -> Result<f64, RenderError> {
    let parsed = match value {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        RenderErrorReason::Other(format!("{helper}: expected a number, got {value}")).into()
    })
}

fn division_by_zero() -> RenderError {
    RenderErrorReason::Other("divide: division by zero".into()).into()
}

/// Integral results become JSON integers so `{{floor 2.7}}` renders `2`,
/// not `2.0`.
fn number(value: f64) -> Json {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Json::from(value as i64)
    } else {
        Number::from_f64(value).map_or(Json::Null, Json::Number)
    }
}

// -----------------------------------------------------------------------------
// Collections
// -----------------------------------------------------------------------------

handlebars_helper!(join: |items: array, {separator: str = ", "}| {
    items
        .iter()
        .map(display)
        .collect::<Vec<_>>()
        .join(separator)
});
handlebars_helper!(first: |items: array| items.first().cloned().unwrap_or(Json::Null));
handlebars_helper!(last: |items: array| items.last().cloned().unwrap_or(Json::Null));

/// Strings unquoted, everything else as JSON.
fn display(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        Json::Null => String::new(),
        other => other.to_string(),
    }
}

// -----------------------------------------------------------------------------
// Misc
// -----------------------------------------------------------------------------

handlebars_helper!(default_value: |value: Json, fallback: Json| {
    match value {
        Json::Null => fallback.clone(),
        Json::String(s) if s.is_empty() => fallback.clone(),
        other => other.clone(),
    }
});
handlebars_helper!(json: |value: Json| value.to_string());
