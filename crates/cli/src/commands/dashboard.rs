//! Dashboard page commands.
//!
//! Each command passes the access guard first: without a signed-in user it
//! fails with [`CliError::NotSignedIn`], and a page missing from the user's
//! navigation fails with [`CliError::PageUnavailable`].
//!
//! # Usage
//!
//! ```bash
//! pharmconnect products -s "pain relief" --add 1 --add 3
//! pharmconnect orders -s paracetamol --status delivered
//! pharmconnect connections
//! pharmconnect pharmacies -s medplus
//! pharmconnect code
//! ```

use std::io::Write;

use pharmconnect_portal::Portal;
use pharmconnect_portal::models::User;
use pharmconnect_portal::views::connections::connected_vendors;
use pharmconnect_portal::views::orders::{OrderQuery, StatusFilter, visible_orders};
use pharmconnect_portal::views::pharmacies::{search_pharmacies, share_code};
use pharmconnect_portal::views::products::{Cart, search_products};
use pharmconnect_portal::views::{self, Access, Page};

use super::CliError;

/// List products, optionally adding some to a cart.
pub fn products(
    portal: &Portal,
    search: &str,
    add: &[String],
    out: &mut impl Write,
) -> Result<(), CliError> {
    let user = open_page(portal, Page::Products)?;
    let catalog = &portal.samples().products;

    let found = search_products(catalog, search);
    if found.is_empty() {
        writeln!(out, "No products found")?;
    } else {
        writeln!(
            out,
            "{:<4} {:<10} {:<20} {:<18} {:>8} {:>6}  {}",
            "ID", "SKU", "NAME", "CATEGORY", "PRICE", "STOCK", "AVAILABILITY"
        )?;
        for product in found {
            writeln!(
                out,
                "{:<4} {:<10} {:<20} {:<18} {:>8} {:>6}  {}",
                product.id.as_str(),
                product.sku,
                product.name,
                product.category,
                product.unit_price().display(),
                product.stock,
                product.availability().label()
            )?;
        }
    }

    if add.is_empty() {
        return Ok(());
    }

    let mut cart = Cart::for_user(&user).ok_or(CliError::CartUnavailable)?;
    for id in add {
        let product = catalog
            .iter()
            .find(|product| product.id.as_str() == id)
            .ok_or_else(|| CliError::UnknownProduct(id.clone()))?;
        cart.add(product, portal.notifier());
    }

    writeln!(out)?;
    writeln!(out, "Cart ({} items)", cart.item_count())?;
    for line in cart.lines() {
        writeln!(
            out,
            "  {} x{} {}",
            line.product.name,
            line.quantity,
            line.subtotal().display()
        )?;
    }
    writeln!(out, "Total: {}", cart.total().display())?;
    Ok(())
}

/// List orders matching the search and status filter.
pub fn orders(
    portal: &Portal,
    search: &str,
    status: StatusFilter,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let user = open_page(portal, Page::Orders)?;
    let query = OrderQuery {
        search: search.to_owned(),
        status,
    };

    let found = visible_orders(&portal.samples().orders, &user, &query);
    if found.is_empty() {
        writeln!(out, "No orders found")?;
        return Ok(());
    }

    for order in found {
        writeln!(
            out,
            "{:<9} {} {:<26} {:<8} {:<28} {:<10} {:>9} {}",
            order.id.as_str(),
            order.date,
            order.pharmacy.name,
            order.item_label(),
            order.items_summary(),
            order.status.label(),
            order.total_price().display(),
            order.tracking_number.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

/// List the central fills a pharmacy is connected to.
pub fn connections(portal: &Portal, out: &mut impl Write) -> Result<(), CliError> {
    let user = open_page(portal, Page::Connections)?;

    let vendors = connected_vendors(&portal.samples().vendors, &user);
    if vendors.is_empty() {
        writeln!(out, "No connected central fills")?;
        return Ok(());
    }

    for vendor in vendors {
        writeln!(out, "{} [{}] {}", vendor.name, vendor.code, vendor.status.label())?;
        writeln!(out, "  {}", vendor.address)?;
        writeln!(
            out,
            "  {} <{}> {}",
            vendor.contact_person, vendor.email, vendor.phone
        )?;
        writeln!(
            out,
            "  Connected {}, {} products",
            vendor.connected, vendor.products
        )?;
    }
    Ok(())
}

/// List pharmacies served by a central fill.
pub fn pharmacies(portal: &Portal, search: &str, out: &mut impl Write) -> Result<(), CliError> {
    open_page(portal, Page::Pharmacies)?;

    let found = search_pharmacies(&portal.samples().pharmacies, search);
    if found.is_empty() {
        writeln!(out, "No pharmacies found")?;
        return Ok(());
    }

    for pharmacy in found {
        writeln!(out, "{} ({})", pharmacy.name, pharmacy.status.label())?;
        writeln!(
            out,
            "  {} <{}> {}",
            pharmacy.contact_person, pharmacy.email, pharmacy.phone
        )?;
        writeln!(
            out,
            "  Joined {}, last order {}",
            pharmacy.joined_date, pharmacy.last_order
        )?;
    }
    Ok(())
}

/// Print the central fill's connection code for sharing.
pub fn code(portal: &Portal, out: &mut impl Write) -> Result<(), CliError> {
    let user = open_page(portal, Page::Pharmacies)?;

    if let Some(code) = share_code(&user, portal.notifier()) {
        writeln!(out, "{code}")?;
    }
    Ok(())
}

/// Apply the access guard and check `page` is in the user's navigation.
fn open_page(portal: &Portal, page: Page) -> Result<User, CliError> {
    let user = match views::require_user(&portal.session().snapshot()) {
        Access::Granted(user) => user,
        Access::RedirectToLogin => return Err(CliError::NotSignedIn),
        Access::Loading => return Err(CliError::Loading),
    };

    let role = user.role();
    if !views::navigation(role).contains(&page) {
        return Err(CliError::PageUnavailable {
            page: page.label(),
            role,
        });
    }
    Ok(user)
}
