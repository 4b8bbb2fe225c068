#![no_main]

use libfuzzer_sys::fuzz_target;
use twin_client::{twin_key, InMemoryLedger, TwinStore, INDEX_KEY};

// Arbitrary index and record blobs must be recovered (treated as empty or
// skipped), never panic the loader or surface a parse error.
fuzz_target!(|data: (&[u8], &[u8])| {
    let (index_blob, record_blob) = data;

    let mut ledger = InMemoryLedger::new();
    ledger.seed(INDEX_KEY, index_blob);
    ledger.seed(&twin_key("a"), record_blob);

    let store = TwinStore::new(ledger).expect("in-memory ledger is available");
    let _ = store.load_all().expect("corrupt blobs are non-fatal");
});
