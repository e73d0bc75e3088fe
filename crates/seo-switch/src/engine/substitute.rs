//! Recursive placeholder substitution.
//!
//! Placeholders of one template are resolved concurrently and spliced back in
//! template order. Resolved content containing `#` is expanded again with the
//! same render context, bounded by the scope's depth cap and cycle guard.

use std::collections::BTreeSet;

use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};

use crate::engine::diagnostics::{Diagnostic, DiagnosticCode};
use crate::engine::render::SwitchEngine;
use crate::engine::resolver::LinkPair;
use crate::engine::scope::{Frame, RenderScope};
use crate::engine::RenderError;
use crate::parser::{DELIMITER, Placeholder, Token, compute_suggestions, tokenize};
use crate::rotation::MAIN_SLOT;
use crate::types::ResolutionContext;

/// Text produced for part of a template, with the diagnostics raised there
/// and the switch categories looked up to produce it.
#[derive(Debug, Default)]
pub(crate) struct Expansion {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
    pub categories: BTreeSet<u32>,
}

impl Expansion {
    fn unexpanded(source: &str, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            text: source.to_string(),
            diagnostics,
            categories: BTreeSet::new(),
        }
    }

    fn concat(parts: Vec<Expansion>) -> Self {
        let mut out = Expansion::default();
        for part in parts {
            out.text.push_str(&part.text);
            out.diagnostics.extend(part.diagnostics);
            out.categories.extend(part.categories);
        }
        out
    }
}

impl SwitchEngine {
    /// Expand every token of `template` within `scope`.
    pub(crate) fn expand<'a>(
        &'a self,
        template: &'a str,
        context: &'a ResolutionContext,
        scope: RenderScope,
    ) -> BoxFuture<'a, Result<Expansion, RenderError>> {
        async move {
            let pending: Vec<_> = tokenize(template)
                .map(|token| self.expand_token(token, context, &scope))
                .collect();
            let parts = try_join_all(pending).await?;
            Ok(Expansion::concat(parts))
        }
        .boxed()
    }

    async fn expand_token(
        &self,
        token: Token<'_>,
        context: &ResolutionContext,
        scope: &RenderScope,
    ) -> Result<Expansion, RenderError> {
        match token {
            Token::Literal(text) => Ok(Expansion {
                text: text.to_string(),
                diagnostics: unknown_placeholders(text),
                categories: BTreeSet::new(),
            }),
            Token::Placeholder {
                placeholder,
                source,
            } => {
                self.expand_placeholder(placeholder, source, context, scope)
                    .await
            }
        }
    }

    async fn expand_placeholder(
        &self,
        placeholder: Placeholder,
        source: &str,
        context: &ResolutionContext,
        scope: &RenderScope,
    ) -> Result<Expansion, RenderError> {
        let child = match scope.enter(Frame::from(placeholder)) {
            Ok(child) => child,
            Err(interrupt) => {
                return Ok(Expansion::unexpanded(
                    source,
                    vec![interrupt.into_diagnostic(source)],
                ));
            }
        };

        let mut diagnostics = Vec::new();
        // Recorded even when every tier is empty.
        let mut categories = BTreeSet::new();
        if let Frame::Switch { category_id, .. } = Frame::from(placeholder) {
            categories.insert(category_id);
        }
        let fragment = match placeholder {
            Placeholder::CompSwitch { slot, category_id } => self
                .resolver()
                .resolve_switch(context, category_id, slot)
                .await?
                .map(|resolved| resolved.content),
            Placeholder::CompSwitchSelf { category_id } => self
                .resolver()
                .resolve_switch(context, category_id, MAIN_SLOT)
                .await?
                .map(|resolved| resolved.content),
            Placeholder::LinkGammeCar { category_id } => {
                let pair = self.resolver().resolve_link(context, category_id).await?;
                link_fragment(pair, source, &mut diagnostics)
            }
            Placeholder::MinPrice => {
                let price = self.derived().resolve(placeholder, context).await?;
                if price.is_none() {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticCode::MissingPrice,
                        source,
                        format!(
                            "no sellable SKU for category {} and vehicle type {}",
                            context.category_id, context.vehicle_type_id
                        ),
                    ));
                }
                Some(price.unwrap_or_default())
            }
            derived => self.derived().resolve(derived, context).await?,
        };

        let Some(fragment) = fragment else {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::UnresolvedToken,
                source,
                unresolved_detail(placeholder),
            ));
            return Ok(Expansion {
                text: source.to_string(),
                diagnostics,
                categories,
            });
        };

        if !fragment.contains(DELIMITER) {
            return Ok(Expansion {
                text: fragment,
                diagnostics,
                categories,
            });
        }
        let inner = self.expand(&fragment, context, child).await?;
        diagnostics.extend(inner.diagnostics);
        categories.extend(inner.categories);
        Ok(Expansion {
            text: inner.text,
            diagnostics,
            categories,
        })
    }
}

/// Combine the halves of a category link.
///
/// A missing target degrades to the bare anchor text, a missing anchor to an
/// empty string; both missing leaves the token unresolved.
fn link_fragment(
    pair: LinkPair,
    source: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    if pair.is_mismatched() {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::LinkPoolMismatch,
            source,
            format!(
                "anchor pool has {} entries but target pool has {}",
                pair.anchor_pool_size, pair.target_pool_size
            ),
        ));
    }
    match (pair.anchor, pair.target) {
        (Some(anchor), Some(target)) => Some(format!("<a href=\"{target}\">{anchor}</a>")),
        (Some(anchor), None) => {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::EmptyLinkHalf,
                source,
                "no link target, rendering anchor text only",
            ));
            Some(anchor)
        }
        (None, Some(_)) => {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::EmptyLinkHalf,
                source,
                "no anchor text, link omitted",
            ));
            Some(String::new())
        }
        (None, None) => None,
    }
}

fn unresolved_detail(placeholder: Placeholder) -> String {
    match placeholder {
        Placeholder::CompSwitch { slot, category_id } => {
            format!("no switch content in any tier for category {category_id} slot {slot}")
        }
        Placeholder::CompSwitchSelf { category_id } => {
            format!("no main switch content in any tier for category {category_id}")
        }
        Placeholder::LinkGammeCar { category_id } => {
            format!("no link anchor or target for category {category_id}")
        }
        other => format!("no value for {other}"),
    }
}

/// Diagnostics for `#...#` spans in literal text that look like misspelled
/// placeholders. The text itself is left untouched.
fn unknown_placeholders(literal: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut rest = literal;
    while let Some(open) = rest.find(DELIMITER) {
        let after = &rest[open + DELIMITER.len_utf8()..];
        let Some(close) = after.find(DELIMITER) else {
            break;
        };
        let inner = &after[..close];
        let suggestions = compute_suggestions(inner);
        if !suggestions.is_empty() {
            let names: Vec<String> = suggestions.iter().map(|s| format!("#{s}#")).collect();
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::UnknownToken,
                format!("#{inner}#"),
                format!("unknown placeholder, did you mean {}?", names.join(", ")),
            ));
        }
        rest = &after[close..];
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_misspelled_placeholder() {
        let diagnostics = unknown_placeholders("Prix #MinPrix# seulement");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::UnknownToken);
        assert_eq!(diagnostics[0].token, "#MinPrix#");
        assert!(diagnostics[0].detail.contains("#MinPrice#"));
    }

    #[test]
    fn ignores_prose_hashes() {
        assert!(unknown_placeholders("réf #12 et #34").is_empty());
        assert!(unknown_placeholders("#hashtag#").is_empty());
    }

    #[test]
    fn link_with_both_halves() {
        let mut diagnostics = Vec::new();
        let pair = LinkPair {
            anchor: Some("Rotule".to_string()),
            target: Some("/rotule".to_string()),
            anchor_pool_size: 1,
            target_pool_size: 1,
        };
        assert_eq!(
            link_fragment(pair, "#LinkGammeCar_1#", &mut diagnostics).as_deref(),
            Some("<a href=\"/rotule\">Rotule</a>")
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn link_without_target_keeps_anchor() {
        let mut diagnostics = Vec::new();
        let pair = LinkPair {
            anchor: Some("Rotule".to_string()),
            target: None,
            anchor_pool_size: 1,
            target_pool_size: 0,
        };
        assert_eq!(
            link_fragment(pair, "#LinkGammeCar_1#", &mut diagnostics).as_deref(),
            Some("Rotule")
        );
        assert_eq!(diagnostics[0].code, DiagnosticCode::EmptyLinkHalf);
    }

    #[test]
    fn link_without_halves_is_unresolved() {
        let mut diagnostics = Vec::new();
        let pair = LinkPair {
            anchor: None,
            target: None,
            anchor_pool_size: 0,
            target_pool_size: 0,
        };
        assert_eq!(link_fragment(pair, "#LinkGammeCar_1#", &mut diagnostics), None);
        assert!(diagnostics.is_empty());
    }
}
