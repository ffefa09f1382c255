//! `leftovergo demo` - 3 ロールを順にログインさせて 1 件の listing を配達完了まで進める
//!
//! 各ステップのビューを JSON で stdout に出します。

use leftovergo_core::app::{App, AppBuilder, MarketplaceConfig, RoleView};
use leftovergo_core::domain::{Identity, ListingDraft, LoginDetails, Role};
use leftovergo_core::observability::ListingCounts;
use leftovergo_core::Listing;
use serde::Serialize;
use tracing::{info, warn};

use crate::CliError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    step: &'a str,
    user: &'a str,
    view: RoleView<'a>,
    recent_completed: &'a [&'a Listing],
}

#[derive(Debug, Serialize)]
struct Summary {
    step: &'static str,
    counts: ListingCounts,
    total: usize,
}

pub(crate) fn run(config: MarketplaceConfig) -> Result<(), CliError> {
    let limit = config.recent_completed_limit;
    let mut app = AppBuilder::new().with_config(config).build()?;

    let donor = sign_in(&mut app, "Hotel Taj", "9876543210", Role::Donor)?;
    let draft = ListingDraft::new(
        "Veg Biryani",
        "25 plates",
        "Within 2 hours",
        "Jubilee Hills, Road 36",
    )
    .with_description("Freshly cooked, packed in foil trays.");
    let listing = app.marketplace_mut().create_listing(&donor, draft)?;
    print_snapshot(&app, "listing posted", limit)?;

    let receiver = sign_in(&mut app, "Asha", "8123456789", Role::Receiver)?;
    print_snapshot(&app, "receiver browsing", limit)?;
    app.marketplace_mut().claim_listing(
        listing.id(),
        &receiver,
        "Asha Shelter Home",
        "Kukatpally, Lane 4",
    )?;
    print_snapshot(&app, "listing claimed", limit)?;

    let partner = sign_in(&mut app, "Ravi", "7012345678", Role::Delivery)?;
    app.marketplace_mut().accept_pickup(listing.id(), &partner)?;
    print_snapshot(&app, "pickup accepted", limit)?;

    // 2 回目の claim は拒否される
    if let Err(err) = app.marketplace_mut().claim_listing(
        listing.id(),
        &receiver,
        "Asha Shelter Home",
        "Kukatpally, Lane 4",
    ) {
        warn!(kind = ?err.kind(), error = %err, "expected rejection");
    }

    app.marketplace_mut().mark_delivered(listing.id(), &partner)?;
    print_snapshot(&app, "delivered", limit)?;

    let counts = app.marketplace().counts();
    println!(
        "{}",
        serde_json::to_string_pretty(&Summary {
            step: "summary",
            counts,
            total: counts.total(),
        })?
    );
    Ok(())
}

/// OTP はどこにも送らず、ログに出してそのまま入力したことにする
fn sign_in(app: &mut App, name: &str, phone: &str, role: Role) -> Result<Identity, CliError> {
    let session = app.session_mut();
    session.logout();
    let code = session.request_code(LoginDetails::new(name, phone, role))?;
    info!(%role, code = code.as_str(), "verification code issued");
    Ok(session.verify(code.as_str())?)
}

fn print_snapshot(app: &App, step: &str, limit: usize) -> Result<(), CliError> {
    let (Some(identity), Some(view)) = (app.current_identity(), app.current_view()) else {
        return Ok(());
    };
    let recent_completed = view.recent_completed(limit);
    let snapshot = Snapshot {
        step,
        user: identity.name(),
        recent_completed,
        view: view.clone(),
    };
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
