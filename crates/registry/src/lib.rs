//! Declarative method registry for the Guildgate API.
//!
//! One entry per remote method: wire identity, verb, authorization
//! requirement, and declared parameters, paired with a typed invoker that
//! drives the corresponding wrapper with placeholder arguments. The client
//! never consults this table at dispatch time; it exists so a verification
//! harness can enumerate every declared method and assert that its wrapper
//! produces a conforming descriptor (see `tests/conformance.rs`).

use std::sync::Arc;

use futures_util::future::BoxFuture;
use guildgate_api::GuildgateClient;
use guildgate_api::sections::score::Period;
use guildgate_types::{MethodSpec, ParamSpec, Placement, Verb};
use serde_json::json;

/// Drives one registered method against a client, discarding the outcome.
///
/// Outcomes are deliberately ignored: against a recording transport every
/// reply is JSON null, which typed wrappers fail to decode; by then the
/// descriptor has already been captured, which is all the harness needs.
pub type Invoker = fn(Arc<GuildgateClient>) -> BoxFuture<'static, ()>;

/// One registered method: declared shape plus invoker.
pub struct RegisteredMethod {
    pub spec: MethodSpec,
    pub invoke: Invoker,
}

/// The full method table, one [`RegisteredMethod`] per remote method.
pub struct MethodRegistry {
    pub methods: Vec<RegisteredMethod>,
}

fn query(name: &str) -> ParamSpec {
    ParamSpec {
        name: name.into(),
        placement: Placement::Query,
        required: true,
    }
}

fn query_opt(name: &str) -> ParamSpec {
    ParamSpec {
        name: name.into(),
        placement: Placement::Query,
        required: false,
    }
}

fn body(name: &str) -> ParamSpec {
    ParamSpec {
        name: name.into(),
        placement: Placement::Body,
        required: true,
    }
}

fn entry(
    section: &str,
    method: &str,
    verb: Verb,
    requires_auth: bool,
    params: Vec<ParamSpec>,
    invoke: Invoker,
) -> RegisteredMethod {
    RegisteredMethod {
        spec: MethodSpec {
            section: section.into(),
            method: method.into(),
            verb,
            requires_auth,
            params,
        },
        invoke,
    }
}

impl MethodRegistry {
    /// Build the table of every declared remote method.
    pub fn new() -> Self {
        let methods = vec![
            // token
            entry("token", "auth", Verb::Post, false, vec![body("token")], |c| {
                Box::pin(async move {
                    let _ = c.token().auth("placeholder").await;
                })
            }),
            entry("token", "issue", Verb::Post, true, vec![body("owner")], |c| {
                Box::pin(async move {
                    let _ = c.token().issue("placeholder").await;
                })
            }),
            entry("token", "me", Verb::Get, true, Vec::new(), |c| {
                Box::pin(async move {
                    let _ = c.token().me().await;
                })
            }),
            // bridge
            entry(
                "bridge",
                "link",
                Verb::Post,
                true,
                vec![body("discord_id"), body("uuid")],
                |c| {
                    Box::pin(async move {
                        let _ = c.bridge().link("placeholder", "placeholder").await;
                    })
                },
            ),
            entry(
                "bridge",
                "getLinked",
                Verb::Get,
                true,
                vec![query_opt("uuid"), query_opt("discord_id")],
                |c| {
                    Box::pin(async move {
                        let _ = c.bridge().get_linked(Some("placeholder"), Some("placeholder")).await;
                    })
                },
            ),
            entry(
                "bridge",
                "setStatus",
                Verb::Post,
                true,
                vec![body("connected"), body("version")],
                |c| {
                    Box::pin(async move {
                        let _ = c.bridge().set_status(true, "placeholder").await;
                    })
                },
            ),
            entry("bridge", "getStatus", Verb::Get, true, vec![query("account_id")], |c| {
                Box::pin(async move {
                    let _ = c.bridge().get_status("placeholder").await;
                })
            }),
            // bridgelock
            entry(
                "bridgelock",
                "add",
                Verb::Post,
                true,
                vec![body("uuid"), body("moderator_id"), body("reason")],
                |c| {
                    Box::pin(async move {
                        let _ = c.bridgelock().add("placeholder", "placeholder", "placeholder").await;
                    })
                },
            ),
            entry("bridgelock", "check", Verb::Get, true, vec![query("uuid")], |c| {
                Box::pin(async move {
                    let _ = c.bridgelock().check("placeholder").await;
                })
            }),
            entry("bridgelock", "remove", Verb::Post, true, vec![body("uuid")], |c| {
                Box::pin(async move {
                    let _ = c.bridgelock().remove("placeholder").await;
                })
            }),
            // experimental
            entry(
                "experimental",
                "moderateMessage",
                Verb::Post,
                true,
                vec![body("message")],
                |c| {
                    Box::pin(async move {
                        let _ = c.experimental().moderate_message("placeholder").await;
                    })
                },
            ),
            entry("experimental", "saveInvite", Verb::Post, true, vec![body("uuid")], |c| {
                Box::pin(async move {
                    let _ = c.experimental().save_invite("placeholder").await;
                })
            }),
            entry("experimental", "wasInvited", Verb::Get, true, vec![query("uuid")], |c| {
                Box::pin(async move {
                    let _ = c.experimental().was_invited("placeholder").await;
                })
            }),
            // gtw
            entry("gtw", "start", Verb::Get, true, vec![query("word")], |c| {
                Box::pin(async move {
                    let _ = c.gtw().start("placeholder").await;
                })
            }),
            entry("gtw", "getTop", Verb::Get, true, Vec::new(), |c| {
                Box::pin(async move {
                    let _ = c.gtw().get_top().await;
                })
            }),
            entry(
                "gtw",
                "awardPoints",
                Verb::Post,
                true,
                vec![body("discord_id"), body("points")],
                |c| {
                    Box::pin(async move {
                        let _ = c.gtw().award_points("placeholder", 1).await;
                    })
                },
            ),
            // inactive
            entry(
                "inactive",
                "add",
                Verb::Post,
                true,
                vec![body("uuid"), body("days")],
                |c| {
                    Box::pin(async move {
                        let _ = c.inactive().add("placeholder", 1).await;
                    })
                },
            ),
            entry("inactive", "remove", Verb::Post, true, vec![body("uuid")], |c| {
                Box::pin(async move {
                    let _ = c.inactive().remove("placeholder").await;
                })
            }),
            entry("inactive", "check", Verb::Get, true, vec![query("uuid")], |c| {
                Box::pin(async move {
                    let _ = c.inactive().check("placeholder").await;
                })
            }),
            entry("inactive", "list", Verb::Get, true, Vec::new(), |c| {
                Box::pin(async move {
                    let _ = c.inactive().list().await;
                })
            }),
            // longpoll
            entry(
                "longpoll",
                "create",
                Verb::Post,
                true,
                vec![body("action"), body("executor"), body("payload")],
                |c| {
                    Box::pin(async move {
                        let _ = c.longpoll().create("placeholder", "placeholder", &json!({})).await;
                    })
                },
            ),
            entry("longpoll", "remove", Verb::Post, true, vec![body("request_id")], |c| {
                Box::pin(async move {
                    let _ = c.longpoll().remove(1).await;
                })
            }),
            entry("longpoll", "getApplicable", Verb::Get, true, Vec::new(), |c| {
                Box::pin(async move {
                    let _ = c.longpoll().get_applicable().await;
                })
            }),
            // minigames
            entry(
                "minigames",
                "updateCoins",
                Verb::Post,
                true,
                vec![body("discord_id"), body("amount"), body("negative")],
                |c| {
                    Box::pin(async move {
                        let _ = c.minigames().update_coins("placeholder", 1).await;
                    })
                },
            ),
            entry(
                "minigames",
                "resetCooldown",
                Verb::Post,
                true,
                vec![body("discord_id"), body("cooldown"), body("time")],
                |c| {
                    Box::pin(async move {
                        let _ = c.minigames().reset_cooldown("placeholder", "placeholder", 1).await;
                    })
                },
            ),
            entry(
                "minigames",
                "logOutcome",
                Verb::Post,
                true,
                vec![
                    body("game_id"),
                    body("discord_id"),
                    body("game"),
                    body("bet"),
                    body("outcome"),
                ],
                |c| {
                    Box::pin(async move {
                        let _ = c
                            .minigames()
                            .log_outcome("placeholder", "placeholder", "placeholder", 1, 1)
                            .await;
                    })
                },
            ),
            entry("minigames", "getTop", Verb::Get, true, Vec::new(), |c| {
                Box::pin(async move {
                    let _ = c.minigames().get_top().await;
                })
            }),
            entry(
                "minigames",
                "getProfile",
                Verb::Get,
                true,
                vec![query("discord_id")],
                |c| {
                    Box::pin(async move {
                        let _ = c.minigames().get_profile("placeholder").await;
                    })
                },
            ),
            entry(
                "minigames",
                "bankTransfer",
                Verb::Post,
                true,
                vec![body("discord_id"), body("amount"), body("withdraw")],
                |c| {
                    Box::pin(async move {
                        let _ = c.minigames().bank_transfer("placeholder", 1, false).await;
                    })
                },
            ),
            // score
            entry(
                "score",
                "getCutoff",
                Verb::Get,
                true,
                vec![query("uuid"), query("overall")],
                |c| {
                    Box::pin(async move {
                        let _ = c.score().get_cutoff("placeholder", false).await;
                    })
                },
            ),
            entry(
                "score",
                "getRolling",
                Verb::Get,
                true,
                vec![query("uuid"), query("overall")],
                |c| {
                    Box::pin(async move {
                        let _ = c.score().get_rolling("placeholder", false).await;
                    })
                },
            ),
            entry(
                "score",
                "saveMessage",
                Verb::Post,
                true,
                vec![body("uuid"), body("nick"), body("guild_id")],
                |c| {
                    Box::pin(async move {
                        let _ = c.score().save_message("placeholder", "placeholder", "placeholder").await;
                    })
                },
            ),
            entry(
                "score",
                "getTop",
                Verb::Get,
                true,
                vec![query_opt("guild_id"), query_opt("offset")],
                |c| {
                    Box::pin(async move {
                        let _ = c.score().get_top(Some("placeholder"), 1).await;
                    })
                },
            ),
            entry(
                "score",
                "getPlayerSummary",
                Verb::Get,
                true,
                vec![query("uuid"), query("type"), query("period_id")],
                |c| {
                    Box::pin(async move {
                        let _ = c.score().get_player_summary("placeholder", Period::Week, "placeholder").await;
                    })
                },
            ),
            entry(
                "score",
                "getPlayerEntry",
                Verb::Get,
                true,
                vec![query("uuid"), query("type"), query("period_id")],
                |c| {
                    Box::pin(async move {
                        let _ = c.score().get_player_entry("placeholder", Period::Week, "placeholder").await;
                    })
                },
            ),
            // server
            entry(
                "server",
                "addBlacklist",
                Verb::Post,
                true,
                vec![body("uuid"), body("reason")],
                |c| {
                    Box::pin(async move {
                        let _ = c.server().add_blacklist("placeholder", Some("placeholder")).await;
                    })
                },
            ),
            entry("server", "removeBlacklist", Verb::Post, true, vec![body("uuid")], |c| {
                Box::pin(async move {
                    let _ = c.server().remove_blacklist("placeholder").await;
                })
            }),
            entry("server", "isBlacklisted", Verb::Get, true, vec![query("uuid")], |c| {
                Box::pin(async move {
                    let _ = c.server().is_blacklisted("placeholder").await;
                })
            }),
            entry(
                "server",
                "verify",
                Verb::Post,
                true,
                vec![body("discord_id"), body("uuid")],
                |c| {
                    Box::pin(async move {
                        let _ = c.server().verify("placeholder", "placeholder").await;
                    })
                },
            ),
            entry("server", "unverify", Verb::Post, true, vec![body("uuid")], |c| {
                Box::pin(async move {
                    let _ = c.server().unverify("placeholder").await;
                })
            }),
            entry(
                "server",
                "getVerified",
                Verb::Get,
                true,
                vec![query_opt("uuid"), query_opt("discord_id")],
                |c| {
                    Box::pin(async move {
                        let _ = c.server().get_verified(Some("placeholder"), Some("placeholder")).await;
                    })
                },
            ),
            // services
            entry("services", "getConfig", Verb::Get, true, Vec::new(), |c| {
                Box::pin(async move {
                    let _ = c.services().get_config().await;
                })
            }),
            // staff
            entry(
                "staff",
                "createLog",
                Verb::Post,
                true,
                vec![body("actor"), body("action"), body("affected"), body("description")],
                |c| {
                    Box::pin(async move {
                        let _ = c
                            .staff()
                            .create_log("placeholder", "placeholder", "placeholder", "placeholder")
                            .await;
                    })
                },
            ),
            entry(
                "staff",
                "approveLog",
                Verb::Post,
                true,
                vec![body("id"), body("reviewer")],
                |c| {
                    Box::pin(async move {
                        let _ = c.staff().approve_log("placeholder", "placeholder").await;
                    })
                },
            ),
            entry("staff", "denyLog", Verb::Post, true, vec![body("id")], |c| {
                Box::pin(async move {
                    let _ = c.staff().deny_log("placeholder").await;
                })
            }),
            entry("staff", "getLogs", Verb::Get, true, vec![query("actor")], |c| {
                Box::pin(async move {
                    let _ = c.staff().get_logs("placeholder").await;
                })
            }),
            // stats
            entry("stats", "getPlayerStats", Verb::Get, false, Vec::new(), |c| {
                Box::pin(async move {
                    let _ = c.stats().get_player_stats().await;
                })
            }),
            entry("stats", "getHourlyStats", Verb::Get, false, Vec::new(), |c| {
                Box::pin(async move {
                    let _ = c.stats().get_hourly_stats().await;
                })
            }),
            entry("stats", "getWeeklyStats", Verb::Get, false, Vec::new(), |c| {
                Box::pin(async move {
                    let _ = c.stats().get_weekly_stats().await;
                })
            }),
        ];

        Self { methods }
    }

    /// Look up one entry by wire identity.
    pub fn find(&self, section: &str, method: &str) -> Option<&RegisteredMethod> {
        self.methods
            .iter()
            .find(|entry| entry.spec.section == section && entry.spec.method == method)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn wire_names_are_unique() {
        let registry = MethodRegistry::new();
        let mut seen = BTreeSet::new();
        for method in &registry.methods {
            assert!(
                seen.insert(method.spec.wire_name()),
                "duplicate entry {}",
                method.spec.wire_name()
            );
        }
    }

    #[test]
    fn every_section_is_represented() {
        let registry = MethodRegistry::new();
        let sections: BTreeSet<&str> = registry.methods.iter().map(|m| m.spec.section.as_str()).collect();
        let expected: BTreeSet<&str> = [
            "bridge",
            "bridgelock",
            "experimental",
            "gtw",
            "inactive",
            "longpoll",
            "minigames",
            "score",
            "server",
            "services",
            "staff",
            "stats",
            "token",
        ]
        .into();
        assert_eq!(sections, expected);
        assert_eq!(registry.len(), 49);
    }

    #[test]
    fn only_the_bootstrap_and_public_stats_skip_auth() {
        let registry = MethodRegistry::new();
        let unauthorized: BTreeSet<String> = registry
            .methods
            .iter()
            .filter(|m| !m.spec.requires_auth)
            .map(|m| m.spec.wire_name())
            .collect();
        let expected: BTreeSet<String> = [
            "token.auth",
            "stats.getPlayerStats",
            "stats.getHourlyStats",
            "stats.getWeeklyStats",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();
        assert_eq!(unauthorized, expected);
    }

    #[test]
    fn find_resolves_wire_identities() {
        let registry = MethodRegistry::new();
        let entry = registry.find("bridge", "getLinked").expect("bridge.getLinked");
        assert_eq!(entry.spec.verb, Verb::Get);
        assert!(registry.find("bridge", "no_such_method").is_none());
    }
}
