//! Class declarations extending the cancellation signal. Cancellation is
//! control flow, not a domain error; a subclass invites `catch` blocks to
//! treat it as one and swallow it.

use crate::analysis::names;
use crate::catalog::{ids, Detection, NodeShape, Rule, RuleContext};
use crate::core::Severity;
use crate::tree::{NodeId, NodeKind};

pub(crate) const RULE: Rule = Rule {
    id: ids::CANCELLATION_EXCEPTION_SUBCLASS,
    name: "CancellationException subclass",
    description: "Detects class declarations whose supertypes include CancellationException",
    shape: NodeShape::ClassDecl,
    default_severity: Severity::Error,
    check,
};

fn check(ctx: &RuleContext<'_>, node: NodeId) -> Vec<Detection> {
    let tree = ctx.tree();
    let NodeKind::Class { name, supertypes } = tree.kind(node) else {
        return Vec::new();
    };
    // One finding per class, however many supertype entries match.
    for supertype in supertypes {
        if names::simple_type_name(supertype) == names::CANCELLATION_EXCEPTION {
            return vec![Detection::new(
                node,
                format!(
                    "class `{name}` extends CancellationException; cancellation is a control-flow \
                     signal, and a domain subclass of it will be swallowed or rethrown by accident"
                ),
            )];
        }
    }
    Vec::new()
}
