use super::{priority, Compose, Items};
use strata_core::{opt, Error, Opt, Result};

use std::cmp::Reverse;

/// Moves lookups and hydrates that target another one's attached item into
/// that option's own sub-options.
///
/// `[lookup("foo"), lookup("bar").for_target("foo")]` becomes
/// `[lookup("foo").with([lookup("bar")])]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestLookup;

impl<T, A> Compose<T, A> for NestLookup {
    fn priority(&self) -> i32 {
        priority::NEST_LOOKUP
    }

    fn prepare<'a>(&'a self, items: Items<'a, T>, opts: &mut Vec<Opt>) -> Result<Items<'a, T>> {
        nest_lookups(opts)?;
        Ok(items)
    }
}

/// Nests all targeted lookups and hydrates in `opts`, recursively.
pub fn nest_lookups(opts: &mut Vec<Opt>) -> Result<()> {
    // Deepest target first, so an option has received its own nested
    // options before it is moved under its parent. Equally deep options keep
    // their relative order.
    while let Some(index) = deepest_targeted(opts) {
        let mut child = opts.remove(index);
        let target = child.relation_target().unwrap_or_default().to_string();

        let (parent, rest) = find_parent(&opts[..index], &target).ok_or_else(|| {
            Error::lookup(format!(
                "unable to nest {} `{}`: no lookup or hydrate attaches `{target}`",
                child.relation_kind().unwrap_or("option"),
                child.relation_field().unwrap_or_default(),
            ))
        })?;

        tracing::trace!(
            field = child.relation_field().unwrap_or_default(),
            %target,
            parent = opts[parent].relation_field().unwrap_or_default(),
            "nesting option under parent"
        );

        child.set_relation_target(rest);
        let field = child.relation_field().unwrap_or_default().to_string();

        if let Some(sub) = opts[parent].relation_opts_mut() {
            let projected = sub
                .iter()
                .any(|opt| matches!(opt, Opt::Fields(fields) if !fields.is_negated()));
            if projected {
                sub.push(opt::omit([field]).into());
            }
            sub.push(child);
        }
    }

    for opt in opts.iter_mut() {
        if let Some(sub) = opt.relation_opts_mut() {
            nest_lookups(sub)?;
        }
    }

    Ok(())
}

fn deepest_targeted(opts: &[Opt]) -> Option<usize> {
    opts.iter()
        .enumerate()
        .filter(|(_, opt)| opt.relation_target().is_some())
        .min_by_key(|(index, opt)| {
            let depth = opt.relation_path().map_or(0, |path| path.matches('.').count());
            (Reverse(depth), *index)
        })
        .map(|(index, _)| index)
}

/// Finds the option attaching the item at `target`, or at the closest
/// ancestor path of it. Returns its index and the rest of the target
/// relative to it.
fn find_parent(candidates: &[Opt], target: &str) -> Option<(usize, Option<String>)> {
    let mut path = target;

    loop {
        let found = candidates
            .iter()
            .rposition(|opt| opt.relation_path().as_deref() == Some(path));

        if let Some(index) = found {
            let rest = target[path.len()..].strip_prefix('.').map(str::to_string);
            return Some((index, rest));
        }

        path = &path[..path.rfind('.')?];
    }
}
