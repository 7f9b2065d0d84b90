//! Authorization for warp commands.
//!
//! Commands never build permission strings themselves. They ask an
//! [`Authorizer`] whether a subject may perform a [`WarpAction`], optionally on
//! a named warp, and the authorizer decides how that maps onto the host's
//! permission nodes.

use std::fmt;

pub const PERMISSION_ROOT: &str = "simplybetter.warps";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarpAction {
    /// Use the basic commands: `/warp`, `/warp help`, `/warps`
    Basic,
    /// Use `/warp <name>` at all
    WarpTo,
    /// Teleport to one particular warp
    TeleportTo,
    /// See one particular warp in listings and suggestions
    See,
    Info,
    Set,
    Delete,
    Rename,
}

impl WarpAction {
    fn node(self) -> &'static str {
        match self {
            WarpAction::Basic => "basic",
            WarpAction::WarpTo => "warpto",
            WarpAction::TeleportTo => "tpto",
            WarpAction::See => "see",
            WarpAction::Info => "warpinfo",
            WarpAction::Set => "setwarp",
            WarpAction::Delete => "delwarp",
            WarpAction::Rename => "renamewarp",
        }
    }

    /// Whether the action is granted per warp rather than per command.
    pub fn is_per_warp(self) -> bool {
        matches!(self, WarpAction::TeleportTo | WarpAction::See)
    }
}

impl fmt::Display for WarpAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", PERMISSION_ROOT, self.node())
    }
}

/// Anything the host can answer permission questions about.
pub trait PermissionSubject {
    /// The explicit value of `node`, or `None` if it was never set.
    fn permission_value(&self, node: &str) -> Option<bool>;

    fn op_level(&self) -> u8;
}

pub trait Authorizer: Send + Sync {
    fn is_allowed(
        &self,
        subject: &dyn PermissionSubject,
        action: WarpAction,
        warp: Option<&str>,
    ) -> bool;

    /// The node reported back to the user when `is_allowed` said no.
    fn describe(&self, action: WarpAction, warp: Option<&str>) -> String;
}

/// Maps actions onto `simplybetter.warps.<action>[.<warp>]` nodes.
///
/// An unset command node falls back to the subject's op level. Per warp nodes
/// are granted by the exact node or by `<action>.*`, but an explicit `false`
/// on the exact node always wins.
pub struct NodeAuthorizer {
    default_op_level: u8,
}

impl NodeAuthorizer {
    pub fn new(default_op_level: u8) -> NodeAuthorizer {
        NodeAuthorizer { default_op_level }
    }

    fn check(&self, subject: &dyn PermissionSubject, node: &str) -> bool {
        subject
            .permission_value(node)
            .unwrap_or_else(|| subject.op_level() >= self.default_op_level)
    }
}

impl Default for NodeAuthorizer {
    fn default() -> Self {
        NodeAuthorizer::new(1)
    }
}

impl Authorizer for NodeAuthorizer {
    fn is_allowed(
        &self,
        subject: &dyn PermissionSubject,
        action: WarpAction,
        warp: Option<&str>,
    ) -> bool {
        match (action.is_per_warp(), warp) {
            (true, Some(warp)) => {
                let node = self.describe(action, Some(warp));
                if subject.permission_value(&node) == Some(false) {
                    return false;
                }
                let wildcard = format!("{}.*", action);
                subject.permission_value(&wildcard) == Some(true) || self.check(subject, &node)
            }
            (true, None) => false,
            (false, _) => self.check(subject, &action.to_string()),
        }
    }

    fn describe(&self, action: WarpAction, warp: Option<&str>) -> String {
        match warp {
            Some(warp) if action.is_per_warp() => format!("{}.{}", action, warp.to_lowercase()),
            _ => action.to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PathSegment {
    WildCard,
    Named(String),
}

#[derive(Debug)]
struct PermissionNode {
    path: Vec<PathSegment>,
    value: bool,
}

impl PermissionNode {
    fn parse(name: &str, value: bool) -> PermissionNode {
        let path = name
            .split('.')
            .map(|s| match s {
                "*" => PathSegment::WildCard,
                s => PathSegment::Named(s.to_lowercase()),
            })
            .collect();
        PermissionNode { path, value }
    }

    fn matches(&self, str: &str) -> bool {
        let mut segments = str.split('.');
        for expected in &self.path {
            let Some(segment) = segments.next() else {
                return false;
            };
            match expected {
                PathSegment::WildCard => return true,
                PathSegment::Named(name) => {
                    if !name.eq_ignore_ascii_case(segment) {
                        return false;
                    }
                }
            }
        }
        segments.next().is_none()
    }

    /// Exact nodes beat wildcards, longer wildcards beat shorter ones.
    fn specificity(&self) -> (bool, usize) {
        let exact = !self.path.contains(&PathSegment::WildCard);
        (exact, self.path.len())
    }
}

/// The permission nodes granted to or revoked from one player.
#[derive(Debug, Default)]
pub struct PlayerPermissionsCache {
    nodes: Vec<PermissionNode>,
}

impl PlayerPermissionsCache {
    pub fn get_node_val(&self, name: &str) -> Option<bool> {
        self.nodes
            .iter()
            .filter(|node| node.matches(name))
            .max_by_key(|node| node.specificity())
            .map(|node| node.value)
    }

    /// Sets `name` to `value`, replacing an earlier entry for the same node.
    pub fn insert(&mut self, name: &str, value: bool) {
        let node = PermissionNode::parse(name, value);
        self.nodes.retain(|existing| existing.path != node.path);
        self.nodes.push(node);
    }

    pub fn grant(&mut self, name: &str) {
        self.insert(name, true);
    }

    pub fn revoke(&mut self, name: &str) {
        self.insert(name, false);
    }
}

/// The server console, which may do anything.
pub struct ConsoleSubject;

impl PermissionSubject for ConsoleSubject {
    fn permission_value(&self, _node: &str) -> Option<bool> {
        Some(true)
    }

    fn op_level(&self) -> u8 {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Subject {
        permissions: PlayerPermissionsCache,
        op_level: u8,
    }

    impl Subject {
        fn new(op_level: u8) -> Subject {
            Subject {
                permissions: Default::default(),
                op_level,
            }
        }
    }

    impl PermissionSubject for Subject {
        fn permission_value(&self, node: &str) -> Option<bool> {
            self.permissions.get_node_val(node)
        }

        fn op_level(&self) -> u8 {
            self.op_level
        }
    }

    #[test]
    fn node_matching() {
        let node = PermissionNode::parse("simplybetter.warps.see.*", true);
        assert!(node.matches("simplybetter.warps.see.spawn"));
        assert!(node.matches("simplybetter.warps.see.*"));
        assert!(!node.matches("simplybetter.warps.tpto.spawn"));
        assert!(!node.matches("simplybetter.warps"));

        let exact = PermissionNode::parse("simplybetter.warps.basic", true);
        assert!(exact.matches("simplybetter.warps.basic"));
        assert!(!exact.matches("simplybetter.warps.basic.extra"));
        assert!(!exact.matches("simplybetter.warps"));
    }

    #[test]
    fn most_specific_node_wins() {
        let mut cache = PlayerPermissionsCache::default();
        cache.grant("simplybetter.*");
        cache.revoke("simplybetter.warps.*");
        cache.grant("simplybetter.warps.see.spawn");

        assert_eq!(cache.get_node_val("simplybetter.warps.see.spawn"), Some(true));
        assert_eq!(cache.get_node_val("simplybetter.warps.see.mine"), Some(false));
        assert_eq!(cache.get_node_val("simplybetter.other"), Some(true));
        assert_eq!(cache.get_node_val("minecraft.command.tp"), None);
    }

    #[test]
    fn insert_replaces_existing_node() {
        let mut cache = PlayerPermissionsCache::default();
        cache.grant("simplybetter.warps.setwarp");
        cache.revoke("simplybetter.warps.setwarp");
        assert_eq!(cache.get_node_val("simplybetter.warps.setwarp"), Some(false));
    }

    #[test]
    fn command_nodes_fall_back_to_op_level() {
        let authorizer = NodeAuthorizer::new(1);
        let player = Subject::new(0);
        let op = Subject::new(1);

        assert!(!authorizer.is_allowed(&player, WarpAction::Set, None));
        assert!(authorizer.is_allowed(&op, WarpAction::Set, None));

        let mut denied_op = Subject::new(4);
        denied_op.permissions.revoke("simplybetter.warps.setwarp");
        assert!(!authorizer.is_allowed(&denied_op, WarpAction::Set, None));

        let mut granted = Subject::new(0);
        granted.permissions.grant("simplybetter.warps.setwarp");
        assert!(authorizer.is_allowed(&granted, WarpAction::Set, None));
    }

    #[test]
    fn per_warp_wildcard_and_negative_override() {
        let authorizer = NodeAuthorizer::new(1);
        let mut player = Subject::new(0);
        player.permissions.grant("simplybetter.warps.see.*");
        player.permissions.revoke("simplybetter.warps.see.secret");

        assert!(authorizer.is_allowed(&player, WarpAction::See, Some("spawn")));
        assert!(!authorizer.is_allowed(&player, WarpAction::See, Some("secret")));
        assert!(!authorizer.is_allowed(&player, WarpAction::TeleportTo, Some("spawn")));

        let mut op = Subject::new(2);
        op.permissions.revoke("simplybetter.warps.tpto.vault");
        assert!(authorizer.is_allowed(&op, WarpAction::TeleportTo, Some("spawn")));
        assert!(!authorizer.is_allowed(&op, WarpAction::TeleportTo, Some("vault")));
    }

    #[test]
    fn per_warp_action_needs_a_warp() {
        let authorizer = NodeAuthorizer::default();
        assert!(!authorizer.is_allowed(&Subject::new(4), WarpAction::See, None));
    }

    #[test]
    fn describe_nodes() {
        let authorizer = NodeAuthorizer::default();
        assert_eq!(
            authorizer.describe(WarpAction::TeleportTo, Some("Spawn")),
            "simplybetter.warps.tpto.spawn"
        );
        assert_eq!(
            authorizer.describe(WarpAction::Rename, Some("spawn")),
            "simplybetter.warps.renamewarp"
        );
    }

    #[test]
    fn console_may_do_anything() {
        let authorizer = NodeAuthorizer::new(4);
        assert!(authorizer.is_allowed(&ConsoleSubject, WarpAction::Delete, None));
        assert!(authorizer.is_allowed(&ConsoleSubject, WarpAction::See, Some("x")));
    }
}
