pub mod l1_service_solana;
