//! Property tests for remote URL construction.

use proptest::prelude::*;

use sitesync::domain::value_objects::GitProtocol;
use sitesync::build_git_url;

fn host() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,12}\\.[a-z]{2,6}").unwrap()
}

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,16}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every URL names exactly one `.git` repository.
    #[test]
    fn property_single_git_suffix(
        base in host(),
        org in name(),
        repo in name(),
        suffixed in any::<bool>(),
        https in any::<bool>(),
    ) {
        let repo = if suffixed { format!("{}.git", repo) } else { repo };
        let protocol = if https { GitProtocol::Https } else { GitProtocol::Ssh };
        let url = build_git_url(&base, &org, &repo, protocol, 22);
        prop_assert!(url.ends_with(".git"));
        prop_assert!(!url.ends_with(".git.git"));
    }

    /// PROPERTY: the default port yields scp-like form, any other port `ssh://`.
    #[test]
    fn property_ssh_form_follows_port(
        base in host(),
        org in name(),
        repo in name(),
        port in 1u16..,
    ) {
        let url = build_git_url(&base, &org, &repo, GitProtocol::Ssh, port);
        if port == 22 {
            prop_assert_eq!(url, format!("git@{}:{}/{}.git", base, org, repo));
        } else {
            prop_assert_eq!(url, format!("ssh://git@{}:{}/{}/{}.git", base, port, org, repo));
        }
    }

    /// PROPERTY: the ssh port never leaks into https URLs.
    #[test]
    fn property_https_ignores_port(
        base in host(),
        org in name(),
        repo in name(),
        port in 1u16..,
    ) {
        let url = build_git_url(&base, &org, &repo, GitProtocol::Https, port);
        prop_assert_eq!(
            url,
            build_git_url(&base, &org, &repo, GitProtocol::Https, 22)
        );
    }
}
