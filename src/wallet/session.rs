//! Collecting a wallet session from neptune-cli
//!
//! Generation, export and derivation run strictly in order, one process at a
//! time. The first failure aborts the session and nothing collected so far is
//! returned.

use tracing::{debug, info};

use crate::error::Result;
use crate::neptune::{parse_address, parse_mnemonic, WalletCli};

use super::types::{Network, WalletSession};

/// Generate a wallet, export its mnemonic and derive `count` addresses
pub fn collect_session<C: WalletCli + ?Sized>(
    cli: &C,
    network: &Network,
    count: u32,
) -> Result<WalletSession> {
    info!("Generating wallet on network {}", network);
    cli.generate_wallet(network)?;

    debug!("Exporting seed phrase");
    let mnemonic = parse_mnemonic(&cli.export_seed_phrase(network)?)?;

    let mut addresses = Vec::with_capacity(count as usize);
    for index in 0..count {
        let output = cli.nth_receiving_address(network, index)?;
        let address = parse_address(&output)?;
        debug!("Derived address #{}", index);
        addresses.push(address);
    }
    info!("Derived {} receiving address(es)", addresses.len());

    Ok(WalletSession {
        network: network.clone(),
        mnemonic,
        addresses,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;

    pub(crate) const SEED_WORDS: [&str; 18] = [
        "orbit", "frost", "candle", "meadow", "pilot", "ribbon", "sugar", "velvet", "harbor",
        "lantern", "marble", "nectar", "oyster", "pepper", "quartz", "saddle", "timber", "walnut",
    ];

    /// Scripted stand-in for neptune-cli
    pub(crate) struct FakeCli {
        pub addresses: Vec<String>,
        pub fail_at_index: Option<u32>,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeCli {
        pub(crate) fn with_addresses(addresses: &[&str]) -> Self {
            Self {
                addresses: addresses.iter().map(|a| a.to_string()).collect(),
                fail_at_index: None,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl WalletCli for FakeCli {
        fn generate_wallet(&self, network: &Network) -> Result<()> {
            self.calls.borrow_mut().push(format!("generate-wallet {}", network));
            Ok(())
        }

        fn export_seed_phrase(&self, network: &Network) -> Result<String> {
            self.calls.borrow_mut().push(format!("export-seed-phrase {}", network));
            let mut out = String::from("Seed phrase for network test.\n");
            for (i, w) in SEED_WORDS.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, w));
            }
            Ok(out)
        }

        fn nth_receiving_address(&self, network: &Network, index: u32) -> Result<String> {
            self.calls
                .borrow_mut()
                .push(format!("nth-receiving-address {} {}", network, index));
            if self.fail_at_index == Some(index) {
                return Err(Error::NonZeroExit {
                    status: "1".to_string(),
                    command: "nth-receiving-address".to_string(),
                    stdout: String::new(),
                    stderr: "boom".to_string(),
                });
            }
            Ok(format!(
                "Wallet: /tmp/wallet\n{}\n",
                self.addresses[index as usize]
            ))
        }
    }

    #[test]
    fn test_collect_session_in_order() {
        let cli = FakeCli::with_addresses(&["addr-a", "addr-b", "addr-c"]);
        let session = collect_session(&cli, &Network::new("test"), 3).unwrap();

        assert_eq!(session.network.as_str(), "test");
        assert_eq!(session.mnemonic.words()[0], "orbit");
        let addrs: Vec<&str> = session.addresses.iter().map(|a| a.as_str()).collect();
        assert_eq!(addrs, vec!["addr-a", "addr-b", "addr-c"]);

        assert_eq!(
            *cli.calls.borrow(),
            vec![
                "generate-wallet test",
                "export-seed-phrase test",
                "nth-receiving-address test 0",
                "nth-receiving-address test 1",
                "nth-receiving-address test 2",
            ]
        );
    }

    #[test]
    fn test_derivation_failure_aborts_remaining() {
        let mut cli = FakeCli::with_addresses(&["a", "b", "c"]);
        cli.fail_at_index = Some(1);

        let result = collect_session(&cli, &Network::new("main"), 3);
        assert!(matches!(result, Err(Error::NonZeroExit { .. })));
        // index 2 was never requested
        assert_eq!(cli.calls.borrow().len(), 4);
    }
}
