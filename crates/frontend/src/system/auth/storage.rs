use crate::shared::navigation::PermissionSet;
use web_sys::window;

/// Written by the authentication layer after sign-in.
const PERMISSIONS_KEY: &str = "auth_permissions";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Permission keys of the signed-in staff member.
///
/// A missing list yields `PermissionSet::Unrestricted`. A list that cannot be
/// read grants nothing, so only ungated navigation is offered.
pub fn get_permissions() -> PermissionSet {
    let raw = get_local_storage().and_then(|s| s.get_item(PERMISSIONS_KEY).ok().flatten());
    parse_permissions(raw.as_deref())
}

fn parse_permissions(raw: Option<&str>) -> PermissionSet {
    let Some(raw) = raw else {
        return PermissionSet::Unrestricted;
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(keys) => PermissionSet::from_keys(keys),
        Err(e) => {
            log::error!("Unreadable permission list, granting nothing: {}", e);
            PermissionSet::from_keys(Vec::<String>::new())
        }
    }
}
