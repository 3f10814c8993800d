use std::collections::BTreeMap;

use dealerdesk_core::Role;

use crate::permissions::*;

const DISTRIBUTOR_PERMISSIONS: &[&str] = &[
    DASHBOARD_VIEW,
    ORDER_VIEW_OWN,
    ORDER_CREATE,
    ORDER_UPDATE,
    SHIPMENT_VIEW,
    SHIPMENT_CREATE,
    SHIPMENT_UPDATE,
    CLAIM_VIEW,
    CLAIM_CREATE,
    DOCUMENT_VIEW,
    DOCUMENT_UPLOAD,
    TARGET_VIEW,
];

const DEALER_PERMISSIONS: &[&str] = &[
    DASHBOARD_VIEW,
    ORDER_VIEW_OWN,
    ORDER_CREATE,
    SHIPMENT_VIEW,
    CLAIM_VIEW,
    CLAIM_CREATE,
    DOCUMENT_VIEW,
];

const SALES_PERMISSIONS: &[&str] = &[
    DASHBOARD_VIEW,
    ORDER_VIEW_ALL,
    TARGET_VIEW,
    TARGET_MANAGE,
    REPORT_EXPORT,
];

const EXPORT_TEAM_PERMISSIONS: &[&str] = &[
    ORDER_VIEW_ALL,
    SHIPMENT_VIEW,
    SHIPMENT_CREATE,
    SHIPMENT_UPDATE,
    DOCUMENT_VIEW,
    DOCUMENT_UPLOAD,
    REPORT_EXPORT,
];

/// Default role table: admins get the whole catalogue, other roles a fixed subset.
pub fn builtin_table() -> BTreeMap<Role, Vec<String>> {
    let owned = |perms: &[&str]| perms.iter().map(|p| p.to_string()).collect::<Vec<_>>();

    let mut table = BTreeMap::new();
    for role in Role::ALL {
        let perms = match role {
            Role::Admin => PERMISSIONS.iter().map(|(p, _)| p.to_string()).collect(),
            Role::Distributor => owned(DISTRIBUTOR_PERMISSIONS),
            Role::Dealer => owned(DEALER_PERMISSIONS),
            Role::Sales => owned(SALES_PERMISSIONS),
            Role::ExportTeam => owned(EXPORT_TEAM_PERMISSIONS),
        };
        table.insert(role, perms);
    }
    table
}
