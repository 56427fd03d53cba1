//! `{{#repeat}}` block helper.
//!
//! ```handlebars
//! {{#repeat 3}}<li>{{@index}}</li>{{/repeat}}
//! {{#repeat count=3 start=1 step=2}}{{@index}}{{#unless @last}},{{/unless}}{{/repeat}}
//! ```
//!
//! The block body is rendered `count` times against the current context.
//! `@index` is `start + i * step`; `@first` and `@last` mark the ends.

use handlebars::{
    BlockContext, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    RenderError, RenderErrorReason, Renderable,
};
use serde_json::Value as Json;

#[derive(Debug, Clone, Copy)]
pub struct RepeatHelper;

impl HelperDef for RepeatHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let plan = RepeatPlan::from_helper(h)?;
        let Some(template) = h.template() else {
            return Ok(());
        };

        for i in 0..plan.count {
            let mut block = rc.block().cloned().unwrap_or_else(BlockContext::new);
            block.set_local_var("index", Json::from(plan.index(i)?));
            block.set_local_var("first", Json::from(i == 0));
            block.set_local_var("last", Json::from(i + 1 == plan.count));

            rc.push_block(block);
            let rendered = template.render(r, ctx, rc, out);
            rc.pop_block();
            rendered?;
        }

        Ok(())
    }
}

/// Iteration parameters read from the helper call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RepeatPlan {
    count: u64,
    start: i64,
    step: i64,
}

impl RepeatPlan {
    /// Count is the first positional parameter or the `count` hash entry.
    fn from_helper(h: &Helper<'_>) -> Result<Self, RenderError> {
        let count = h
            .param(0)
            .or_else(|| h.hash_get("count"))
            .map(|p| p.value())
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("repeat", 0))?;

        Ok(Self {
            count: count.as_u64().ok_or_else(|| invalid("count", count))?,
            start: hash_int(h, "start", 0)?,
            step: hash_int(h, "step", 1)?,
        })
    }

    fn index(&self, i: u64) -> Result<i64, RenderError> {
        i64::try_from(i)
            .ok()
            .and_then(|i| i.checked_mul(self.step))
            .and_then(|offset| offset.checked_add(self.start))
            .ok_or_else(|| RenderErrorReason::Other("repeat: @index overflow".into()).into())
    }
}

fn hash_int(h: &Helper<'_>, key: &'static str, default: i64) -> Result<i64, RenderError> {
    match h.hash_get(key) {
        None => Ok(default),
        Some(p) => p.value().as_i64().ok_or_else(|| invalid(key, p.value())),
    }
}

fn invalid(key: &str, value: &Json) -> RenderError {
    RenderErrorReason::Other(format!(
        "repeat: {key} must be a non-negative integer, got {value}"
    ))
    .into()
}
