use proptest::prelude::*;

use acorn_ledger::{Ledger, LedgerError};
use acorn_types::{AccountId, HolderAddress, TokenKind};

fn test_account(n: u8) -> AccountId {
    AccountId::Holder(HolderAddress::new(format!("acrn_{:0>40}", n)))
}

proptest! {
    /// For any sequence of mint/burn/transfer, per token:
    /// `Σ balances == total_minted − total_burned`.
    #[test]
    fn supply_invariant_holds_for_any_op_sequence(
        ops in prop::collection::vec(
            (0u8..3, 0u8..4, 0u8..4, 0u8..2, 0u64..100_000),
            1..60,
        ),
    ) {
        let mut ledger = Ledger::new();
        for (kind, from, to, token, amount) in ops {
            let token = if token == 0 { TokenKind::Acorn } else { TokenKind::Oak };
            let amount = amount as u128;
            match kind {
                0 => { let _ = ledger.mint(token, &test_account(to), amount); }
                1 => { let _ = ledger.burn(token, &test_account(from), amount); }
                _ => { let _ = ledger.transfer(token, &test_account(from), &test_account(to), amount); }
            }
            for token in TokenKind::ALL {
                prop_assert!(
                    ledger.supply_invariant_holds(token),
                    "invariant broken for {}", token
                );
            }
        }
    }

    /// A failed operation leaves the ledger byte-for-byte unchanged.
    #[test]
    fn failed_ops_change_nothing(
        balance in 0u128..1000,
        attempt in 1001u128..100_000,
    ) {
        let mut ledger = Ledger::new();
        if balance > 0 {
            ledger.mint(TokenKind::Acorn, &test_account(1), balance).unwrap();
        }
        let before = ledger.clone();

        let burn = ledger.burn(TokenKind::Acorn, &test_account(1), attempt);
        prop_assert!(matches!(burn, Err(LedgerError::InsufficientBalance { .. })), "expected InsufficientBalance");
        let transfer = ledger.transfer(TokenKind::Acorn, &test_account(1), &test_account(2), attempt);
        prop_assert!(matches!(transfer, Err(LedgerError::InsufficientBalance { .. })), "expected InsufficientBalance");
        let zero_mint = ledger.mint(TokenKind::Oak, &test_account(1), 0);
        prop_assert!(matches!(zero_mint, Err(LedgerError::InvalidAmount)));

        prop_assert_eq!(ledger.balance(&test_account(1), TokenKind::Acorn),
            before.balance(&test_account(1), TokenKind::Acorn));
        prop_assert_eq!(ledger.supply(TokenKind::Acorn), before.supply(TokenKind::Acorn));
        prop_assert_eq!(ledger.supply(TokenKind::Oak), before.supply(TokenKind::Oak));
    }

    /// Transfers conserve the circulating supply exactly.
    #[test]
    fn transfers_conserve_supply(
        minted in 1u128..1_000_000,
        moves in prop::collection::vec((0u8..4, 0u8..4, 0u64..10_000), 0..30),
    ) {
        let mut ledger = Ledger::new();
        ledger.mint(TokenKind::Acorn, &test_account(0), minted).unwrap();

        for (from, to, amount) in moves {
            let _ = ledger.transfer(
                TokenKind::Acorn,
                &test_account(from),
                &test_account(to),
                amount as u128,
            );
        }
        prop_assert_eq!(ledger.circulating_supply(TokenKind::Acorn), minted);
        prop_assert_eq!(ledger.balance_sum(TokenKind::Acorn), minted);
    }
}
