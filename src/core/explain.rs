//! Explanation Renderer
//!
//! Pure function of a check result and an audience. Pro users get the raw
//! technical details; beginners get a plain sentence first and the details
//! after it. Every (family, level) pair has a sentence.

use crate::core::{honeypot, liquidity, ownership};
use crate::models::types::{AudienceMode, RiskCheckResult, RiskLevel};

/// Check family guessed from a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckFamily {
    Ownership,
    Honeypot,
    Liquidity,
    Other,
}

impl CheckFamily {
    /// Guess from the id prefix first, then from the label
    pub fn guess(result: &RiskCheckResult) -> Self {
        let id = result.id.to_lowercase();
        if id.starts_with("owner-") {
            return CheckFamily::Ownership;
        }
        if id.starts_with("honeypot-") {
            return CheckFamily::Honeypot;
        }
        if id.starts_with("lp-") {
            return CheckFamily::Liquidity;
        }

        let label = result.label.to_lowercase();
        if label == ownership::LABEL.to_lowercase() || label.contains("owner") {
            CheckFamily::Ownership
        } else if label == honeypot::LABEL.to_lowercase() || label.contains("honeypot") {
            CheckFamily::Honeypot
        } else if label == liquidity::LABEL.to_lowercase() || label.contains("liquidity") {
            CheckFamily::Liquidity
        } else {
            CheckFamily::Other
        }
    }
}

/// Plain-language sentence for beginners
pub fn beginner_sentence(family: CheckFamily, level: RiskLevel) -> &'static str {
    match (family, level) {
        (CheckFamily::Ownership, RiskLevel::Green) => {
            "No obvious owner risk was found: ownership is given up, held by a trusted party \
             or a contract, or could not be checked. Read the technical details to see which."
        }
        (CheckFamily::Ownership, RiskLevel::Yellow) => {
            "One wallet still controls this token. Its owner could change fees, block \
             selling or mint new tokens at any moment."
        }
        (CheckFamily::Ownership, RiskLevel::Red) => {
            "We could not even read this token's address. Do not buy something you cannot verify."
        }
        (CheckFamily::Honeypot, RiskLevel::Green) => {
            "A test trade worked normally: you should be able to sell after buying."
        }
        (CheckFamily::Honeypot, RiskLevel::Yellow) => {
            "The test trade was inconclusive or showed warning signs. Be careful and check \
             the taxes before buying."
        }
        (CheckFamily::Honeypot, RiskLevel::Red) => {
            "This looks like a trap: buying may work, but selling is likely blocked or taxed \
             so heavily that you lose your money."
        }
        (CheckFamily::Liquidity, RiskLevel::Green) => {
            "There is a healthy amount of money in the trading pool, so selling should not \
             crash the price."
        }
        (CheckFamily::Liquidity, RiskLevel::Yellow) => {
            "The trading pool is small. Bigger sales may move the price a lot."
        }
        (CheckFamily::Liquidity, RiskLevel::Red) => {
            "There is little or no money in a trading pool for this token. You may not be \
             able to sell at all."
        }
        (CheckFamily::Other, RiskLevel::Green) => "This check looks fine.",
        (CheckFamily::Other, RiskLevel::Yellow) => {
            "This check found warning signs. Investigate before buying."
        }
        (CheckFamily::Other, RiskLevel::Red) => {
            "This check found serious problems. Assume high risk."
        }
    }
}

/// Render one check result for an audience
pub fn explain(result: &RiskCheckResult, mode: AudienceMode) -> String {
    match mode {
        AudienceMode::Pro => result.details.clone(),
        AudienceMode::Beginner => format!(
            "{}\n\nTechnical details: {}",
            beginner_sentence(CheckFamily::guess(result), result.level),
            result.details
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILIES: [CheckFamily; 4] = [
        CheckFamily::Ownership,
        CheckFamily::Honeypot,
        CheckFamily::Liquidity,
        CheckFamily::Other,
    ];

    #[test]
    fn test_family_guess() {
        let by_id = RiskCheckResult::green("owner-renounced", "Whatever", "x");
        assert_eq!(CheckFamily::guess(&by_id), CheckFamily::Ownership);

        let by_label = RiskCheckResult::yellow("custom", "Liquidity Pool", "x");
        assert_eq!(CheckFamily::guess(&by_label), CheckFamily::Liquidity);

        let honeypot = RiskCheckResult::red("honeypot-flagged", "Honeypot Simulation", "x");
        assert_eq!(CheckFamily::guess(&honeypot), CheckFamily::Honeypot);

        let unknown = RiskCheckResult::red("mint-check", "Mint Authority", "x");
        assert_eq!(CheckFamily::guess(&unknown), CheckFamily::Other);
    }

    #[test]
    fn test_every_pair_has_a_sentence() {
        for family in FAMILIES {
            for level in RiskLevel::ALL {
                assert!(!beginner_sentence(family, level).trim().is_empty());
            }
        }
    }

    #[test]
    fn test_pro_is_verbatim() {
        let result = RiskCheckResult::yellow("owner-eoa", ownership::LABEL, "Owner 0xabc is a wallet");
        assert_eq!(explain(&result, AudienceMode::Pro), "Owner 0xabc is a wallet");
    }

    #[test]
    fn test_beginner_appends_details() {
        for level in RiskLevel::ALL {
            for (id, label) in [
                ("owner-x", ownership::LABEL),
                ("honeypot-x", honeypot::LABEL),
                ("lp-x", liquidity::LABEL),
                ("other", "Something Else"),
            ] {
                let result = RiskCheckResult::new(id, label, level, "raw technical text");
                let text = explain(&result, AudienceMode::Beginner);
                assert!(!text.is_empty());
                assert!(text.ends_with("Technical details: raw technical text"));
                assert!(!text.starts_with("Technical details"));
            }
        }
    }

    #[test]
    fn test_unknown_owner_is_not_promised_safe() {
        let result = ownership::timed_out(std::time::Duration::from_millis(9000));
        let text = explain(&result, AudienceMode::Beginner);
        assert!(text.contains("could not be checked"));
        assert!(!text.contains("No single person"));
    }

    #[test]
    fn test_honeypot_red_mentions_trap() {
        let result = RiskCheckResult::red("honeypot-flagged", honeypot::LABEL, "isHoneypot");
        assert!(explain(&result, AudienceMode::Beginner).contains("trap"));
    }
}
