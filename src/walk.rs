//! Pre-order traversal over the ARI tree.
//!
//! [`visit`] drives a [`Visitor`] over every node: the node callback
//! first, then the variant callback, then (for references) the object
//! path and parameter children, or (for tagged literals) the contained
//! container children. Returning [`ControlFlow::Break`] from any
//! callback aborts the traversal and the first break value is
//! propagated to the caller.
//!
//! [`translate`] is the mirror-shaped map: it rebuilds a tree from an
//! input tree, delegating leaves to a [`Translator`] and recursing
//! through containers structurally.

use core::ops::ControlFlow;

use alloc::{boxed::Box, vec::Vec};

use crate::types::{
    Ari, Execset, LitVal, Literal, ObjPath, RefParams, Reference, Report, Rptset,
};

/// Context handed to every visitor callback.
#[derive(Clone, Copy, Debug)]
pub struct VisitCtx<'a> {
    /// The enclosing ARI, absent at the root.
    pub parent: Option<&'a Ari>,
    /// Whether the current node is descended on the key side of an AM
    /// entry.
    pub is_map_key: bool,
}

impl VisitCtx<'_> {
    fn root() -> Self {
        VisitCtx {
            parent: None,
            is_map_key: false,
        }
    }
}

/// Callbacks invoked during [`visit`]. Every callback defaults to
/// continuing the traversal.
pub trait Visitor {
    /// The value carried out of an aborted traversal.
    type Break;

    /// Called for every node before its variant callback.
    fn visit_ari(&mut self, _ari: &Ari, _ctx: &VisitCtx) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called for every literal node.
    fn visit_lit(&mut self, _lit: &Literal, _ctx: &VisitCtx) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called for every reference node.
    fn visit_ref(&mut self, _reference: &Reference, _ctx: &VisitCtx) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called for the object path of every reference node.
    fn visit_objpath(&mut self, _path: &ObjPath, _ctx: &VisitCtx) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }
}

/// Walks `root` in pre-order, invoking `visitor` at every node.
pub fn visit<V: Visitor>(root: &Ari, visitor: &mut V) -> ControlFlow<V::Break> {
    visit_node(root, visitor, &VisitCtx::root())
}

fn visit_node<V: Visitor>(ari: &Ari, visitor: &mut V, ctx: &VisitCtx) -> ControlFlow<V::Break> {
    visitor.visit_ari(ari, ctx)?;
    let value_ctx = VisitCtx {
        parent: Some(ari),
        is_map_key: false,
    };
    let key_ctx = VisitCtx {
        parent: Some(ari),
        is_map_key: true,
    };
    match ari {
        Ari::Lit(lit) => {
            visitor.visit_lit(lit, ctx)?;
            // Container recursion applies only to tagged literals; an
            // untagged container is malformed and has no children to
            // offer.
            if lit.ari_type.is_none() {
                return ControlFlow::Continue(());
            }
            match &lit.value {
                LitVal::Ac(items) => {
                    for item in items {
                        visit_node(item, visitor, &value_ctx)?;
                    }
                }
                LitVal::Am(am) => {
                    for (key, value) in am.iter() {
                        visit_node(key, visitor, &key_ctx)?;
                        visit_node(value, visitor, &value_ctx)?;
                    }
                }
                LitVal::Tbl(tbl) => {
                    for cell in tbl.cells() {
                        visit_node(cell, visitor, &value_ctx)?;
                    }
                }
                LitVal::Execset(execset) => {
                    visit_node(&execset.nonce, visitor, &value_ctx)?;
                    for target in &execset.targets {
                        visit_node(target, visitor, &value_ctx)?;
                    }
                }
                LitVal::Rptset(rptset) => {
                    visit_node(&rptset.nonce, visitor, &value_ctx)?;
                    visit_node(&rptset.reftime, visitor, &value_ctx)?;
                    for report in &rptset.reports {
                        visit_node(&report.reltime, visitor, &value_ctx)?;
                        visit_node(&report.source, visitor, &value_ctx)?;
                        for item in &report.items {
                            visit_node(item, visitor, &value_ctx)?;
                        }
                    }
                }
                _ => {}
            }
        }
        Ari::Ref(reference) => {
            visitor.visit_ref(reference, ctx)?;
            visitor.visit_objpath(&reference.path, ctx)?;
            match &reference.params {
                RefParams::None => {}
                RefParams::Ac(items) => {
                    for item in items {
                        visit_node(item, visitor, &value_ctx)?;
                    }
                }
                RefParams::Am(am) => {
                    for (key, value) in am.iter() {
                        visit_node(key, visitor, &key_ctx)?;
                        visit_node(value, visitor, &value_ctx)?;
                    }
                }
            }
        }
    }
    ControlFlow::Continue(())
}

/// Per-leaf mapping callbacks for [`translate`]. Both callbacks default
/// to copying their input.
pub trait Translator {
    /// The error carried out of a failed translation.
    type Error;

    /// Maps a non-container literal into its output form.
    fn map_lit(&mut self, lit: &Literal) -> Result<Literal, Self::Error> {
        Ok(lit.clone())
    }

    /// Maps an object path into its output form.
    fn map_path(&mut self, path: &ObjPath) -> Result<ObjPath, Self::Error> {
        Ok(path.clone())
    }
}

/// Maps `root` into a new tree, recursing through containers and
/// delegating leaves to `translator`.
pub fn translate<T: Translator>(root: &Ari, translator: &mut T) -> Result<Ari, T::Error> {
    match root {
        Ari::Lit(lit) => {
            let value = match &lit.value {
                LitVal::Ac(items) => LitVal::Ac(translate_all(items, translator)?),
                LitVal::Am(am) => {
                    let mut out = crate::types::Am::new();
                    for (key, value) in am.iter() {
                        out.insert(translate(key, translator)?, translate(value, translator)?);
                    }
                    LitVal::Am(out)
                }
                LitVal::Tbl(tbl) => {
                    let mut out = crate::types::Tbl::new(tbl.ncols());
                    for row in tbl.rows() {
                        let cells: Result<Vec<Ari>, T::Error> =
                            row.iter().map(|cell| translate(cell, translator)).collect();
                        out.push_row(cells?);
                    }
                    LitVal::Tbl(out)
                }
                LitVal::Execset(execset) => LitVal::Execset(Box::new(Execset {
                    nonce: translate(&execset.nonce, translator)?,
                    targets: translate_all(&execset.targets, translator)?,
                })),
                LitVal::Rptset(rptset) => {
                    let mut reports = Vec::with_capacity(rptset.reports.len());
                    for report in &rptset.reports {
                        reports.push(Report {
                            reltime: translate(&report.reltime, translator)?,
                            source: translate(&report.source, translator)?,
                            items: translate_all(&report.items, translator)?,
                        });
                    }
                    LitVal::Rptset(Box::new(Rptset {
                        nonce: translate(&rptset.nonce, translator)?,
                        reftime: translate(&rptset.reftime, translator)?,
                        reports,
                    }))
                }
                _ => return Ok(Ari::Lit(translator.map_lit(lit)?)),
            };
            Ok(Ari::Lit(Literal {
                ari_type: lit.ari_type,
                value,
            }))
        }
        Ari::Ref(reference) => {
            let path = translator.map_path(&reference.path)?;
            let params = match &reference.params {
                RefParams::None => RefParams::None,
                RefParams::Ac(items) => RefParams::Ac(translate_all(items, translator)?),
                RefParams::Am(am) => {
                    let mut out = crate::types::Am::new();
                    for (key, value) in am.iter() {
                        out.insert(translate(key, translator)?, translate(value, translator)?);
                    }
                    RefParams::Am(out)
                }
            };
            Ok(Ari::Ref(Reference { path, params }))
        }
    }
}

fn translate_all<T: Translator>(items: &[Ari], translator: &mut T) -> Result<Vec<Ari>, T::Error> {
    items.iter().map(|item| translate(item, translator)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Am, AriType, IdSeg};
    use alloc::{format, string::String, vec};

    /// Records one tag per callback invocation.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
        stop_after: Option<usize>,
    }

    impl Visitor for Recorder {
        type Break = usize;

        fn visit_ari(&mut self, ari: &Ari, ctx: &VisitCtx) -> ControlFlow<usize> {
            let role = if ctx.is_map_key { "key" } else { "value" };
            self.seen.push(format!(
                "ari:{}:{role}",
                if matches!(ari, Ari::Lit(_)) { "lit" } else { "ref" }
            ));
            if self.stop_after.is_some_and(|limit| self.seen.len() >= limit) {
                return ControlFlow::Break(self.seen.len());
            }
            ControlFlow::Continue(())
        }

        fn visit_lit(&mut self, _lit: &Literal, _ctx: &VisitCtx) -> ControlFlow<usize> {
            self.seen.push("lit".into());
            ControlFlow::Continue(())
        }

        fn visit_ref(&mut self, _r: &Reference, _ctx: &VisitCtx) -> ControlFlow<usize> {
            self.seen.push("ref".into());
            ControlFlow::Continue(())
        }

        fn visit_objpath(&mut self, _p: &ObjPath, _ctx: &VisitCtx) -> ControlFlow<usize> {
            self.seen.push("objpath".into());
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn preorder_over_reference_params() {
        let reference = Reference::with_params(
            ObjPath::typed("adm", AriType::Ctrl, 4i64),
            RefParams::Ac(vec![Ari::from(1i64)]),
        );
        let mut recorder = Recorder::default();
        assert!(visit(&Ari::from(reference), &mut recorder).is_continue());
        assert_eq!(
            recorder.seen,
            [
                "ari:ref:value",
                "ref",
                "objpath",
                "ari:lit:value",
                "lit"
            ]
        );
    }

    #[test]
    fn map_keys_are_flagged() {
        let mut am = Am::new();
        am.insert(Ari::from(1i64), Ari::from(2i64));
        let mut recorder = Recorder::default();
        assert!(visit(&Ari::from(am), &mut recorder).is_continue());
        assert_eq!(
            recorder.seen,
            [
                "ari:lit:value",
                "lit",
                "ari:lit:key",
                "lit",
                "ari:lit:value",
                "lit"
            ]
        );
    }

    #[test]
    fn break_propagates_first_code() {
        let ac = Ari::from(vec![Ari::from(1i64), Ari::from(2i64), Ari::from(3i64)]);
        let mut recorder = Recorder {
            stop_after: Some(3),
            ..Recorder::default()
        };
        assert_eq!(visit(&ac, &mut recorder), ControlFlow::Break(3));
    }

    #[test]
    fn default_translate_is_deep_copy() {
        struct Identity;
        impl Translator for Identity {
            type Error = core::convert::Infallible;
        }

        let mut am = Am::new();
        am.insert(Ari::from("k"), Ari::from(vec![Ari::from(5i64)]));
        let original = Ari::from(am);
        let copied = translate(&original, &mut Identity).unwrap();
        assert_eq!(original, copied);
    }

    #[test]
    fn translator_rewrites_paths() {
        struct Renamespace;
        impl Translator for Renamespace {
            type Error = core::convert::Infallible;
            fn map_path(&mut self, path: &ObjPath) -> Result<ObjPath, Self::Error> {
                let mut out = path.clone();
                out.ns_id = IdSeg::Text("other".into());
                Ok(out)
            }
        }

        let reference = Ari::from(Reference::new(ObjPath::typed("adm", AriType::Ctrl, 9i64)));
        let rewritten = translate(&reference, &mut Renamespace).unwrap();
        let Ari::Ref(out) = rewritten else {
            panic!("expected a reference");
        };
        assert_eq!(out.path.ns_id, IdSeg::Text("other".into()));
    }
}
