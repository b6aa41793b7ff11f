/// Address a peer uses to reach a remote, derived from its identity.
///
/// `ubuntu@10.0.0.5` -> `10.0.0.5`; an identity without `@` is returned as is.
pub fn rendezvous_address(identity: &str) -> &str {
    identity
        .split_once('@')
        .map_or(identity, |(_, addr)| addr)
}

#[cfg(test)]
mod tests {
    use super::rendezvous_address;

    #[test]
    fn strips_user_part() {
        assert_eq!(rendezvous_address("ubuntu@10.0.0.5"), "10.0.0.5");
    }

    #[test]
    fn bare_identity_is_kept() {
        assert_eq!(rendezvous_address("10.0.0.5"), "10.0.0.5");
        assert_eq!(rendezvous_address("node-a.example.com"), "node-a.example.com");
    }

    #[test]
    fn splits_on_first_at_only() {
        assert_eq!(rendezvous_address("a@b@c"), "b@c");
        assert_eq!(rendezvous_address("user@"), "");
    }
}
