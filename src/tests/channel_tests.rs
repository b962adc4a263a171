use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::directory::{resolve_primary, ChannelDirectory};
use crate::models::{payment_link, ChannelType};
use crate::tests::channel;
use crate::InMemoryChannelDirectory;

#[test]
fn priority_order_decides_without_preferred_flag() {
    let owner = Uuid::new_v4();
    let channels = vec![
        channel(owner, ChannelType::Cash, "in person", false, true),
        channel(owner, ChannelType::Venmo, "@bea", false, true),
    ];
    let resolved = resolve_primary(&channels).unwrap();
    assert_eq!(resolved.channel_type, ChannelType::Venmo);
}

#[test]
fn preferred_flag_beats_priority() {
    let owner = Uuid::new_v4();
    let channels = vec![
        channel(owner, ChannelType::Cash, "in person", true, true),
        channel(owner, ChannelType::Venmo, "@bea", false, true),
    ];
    let resolved = resolve_primary(&channels).unwrap();
    assert_eq!(resolved.channel_type, ChannelType::Cash);
}

#[test]
fn no_channels_resolves_to_none() {
    assert!(resolve_primary(&[]).is_none());
}

#[test]
fn hidden_channels_never_resolve() {
    let owner = Uuid::new_v4();
    let channels = vec![
        channel(owner, ChannelType::Venmo, "@bea", true, false),
        channel(owner, ChannelType::Zelle, "555-0101", false, true),
    ];
    let resolved = resolve_primary(&channels).unwrap();
    assert_eq!(resolved.channel_type, ChannelType::Zelle);

    let all_hidden = vec![channel(owner, ChannelType::Venmo, "@bea", false, false)];
    assert!(resolve_primary(&all_hidden).is_none());
}

#[test]
fn unlisted_types_sort_last_and_keep_order() {
    let owner = Uuid::new_v4();
    let channels = vec![
        channel(owner, ChannelType::Other, "first-other", false, true),
        channel(owner, ChannelType::Applepay, "second", false, true),
    ];
    let resolved = resolve_primary(&channels).unwrap();
    assert_eq!(resolved.identifier, "first-other");
}

#[test]
fn deep_links_for_supported_types_only() {
    let owner = Uuid::new_v4();

    let venmo = channel(owner, ChannelType::Venmo, "bea-w", false, true);
    let link = payment_link(&venmo, dec!(12.50)).unwrap();
    assert_eq!(link, "venmo://paycharge?txn=pay&recipients=bea-w&amount=12.50");

    let cashapp = channel(owner, ChannelType::Cashapp, "$beawong", false, true);
    let link = payment_link(&cashapp, dec!(30)).unwrap();
    assert_eq!(link, "https://cash.app/$beawong/30");

    let paypal = channel(owner, ChannelType::Paypal, "beawong", false, true);
    let link = payment_link(&paypal, dec!(7.25)).unwrap();
    assert_eq!(link, "https://paypal.me/beawong/7.25");

    // No pay-link scheme: the UI falls back to the identifier
    let zelle = channel(owner, ChannelType::Zelle, "555-0101", false, true);
    assert!(payment_link(&zelle, dec!(5)).is_none());
    let cash = channel(owner, ChannelType::Cash, "in person", false, true);
    assert!(payment_link(&cash, dec!(5)).is_none());
}

#[tokio::test]
async fn directory_replaces_a_users_channels() {
    let directory = InMemoryChannelDirectory::new();
    let owner = Uuid::new_v4();

    directory
        .save_channels(owner, vec![channel(owner, ChannelType::Venmo, "@bea", false, true)])
        .await
        .unwrap();
    directory
        .save_channels(owner, vec![channel(owner, ChannelType::Zelle, "555-0101", true, true)])
        .await
        .unwrap();

    let channels = directory.get_channels(owner).await.unwrap();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].channel_type, ChannelType::Zelle);
}
