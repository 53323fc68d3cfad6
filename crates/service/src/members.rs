//! Identity lookups and member administration.

use crate::error::{ServiceError, ServiceResult};
use crate::projects::decode;
use crate::queries;
use crate::state::ProjectService;
use bandstand_core::document::{self, AdminProfile, Band, Member, MemberProfile};
use bandstand_core::ids::{BandId, MemberId};
use bandstand_store::{AssetKind, AssetMeta, Query};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Fields accepted by [`ProjectService::upsert_member`]. Absent fields keep
/// whatever the stored document has.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MemberUpsert {
    pub id: Option<MemberId>,
    pub name: Option<String>,
    #[serde(default)]
    pub email: Vec<String>,
    #[serde(default)]
    pub phone: Vec<String>,
    pub instrument: Option<String>,
    pub subgroup: Option<String>,
    pub visible: Option<bool>,
}

impl ProjectService {
    /// Look up an admin profile by email, through the identity cache.
    ///
    /// Misses are cached too: an unknown email stays "unknown" until the
    /// entry expires.
    pub async fn get_admin_profile(&self, email: &str) -> ServiceResult<Option<AdminProfile>> {
        if let Some(cached) = self.admin_profiles.get(&email.to_string()) {
            tracing::debug!(email, "admin profile served from cache");
            return Ok(cached);
        }
        let query = Query::new(queries::ADMIN_BY_EMAIL)
            .projection(queries::ADMIN_PROFILE_PROJECTION)
            .param("kind", document::KIND_MEMBER)
            .param("email", email);
        let mut docs = self.store.query(&query).await?;
        let profile = if docs.is_empty() {
            None
        } else {
            Some(decode::<AdminProfile>(docs.swap_remove(0))?)
        };
        self.admin_profiles.insert(email.to_string(), profile.clone());
        Ok(profile)
    }

    /// Look up a member profile by id, through the identity cache.
    pub async fn get_member_profile(
        &self,
        member_id: &MemberId,
    ) -> ServiceResult<Option<MemberProfile>> {
        if let Some(cached) = self.member_profiles.get(member_id) {
            tracing::debug!(member = %member_id, "member profile served from cache");
            return Ok(cached);
        }
        let query = Query::new(queries::MEMBER_BY_ID)
            .projection(queries::MEMBER_PROFILE_PROJECTION)
            .param("kind", document::KIND_MEMBER)
            .param("member", member_id.as_str());
        let mut docs = self.store.query(&query).await?;
        let profile = if docs.is_empty() {
            None
        } else {
            Some(decode::<MemberProfile>(docs.swap_remove(0))?)
        };
        self.member_profiles
            .insert(member_id.clone(), profile.clone());
        Ok(profile)
    }

    /// Bands whose admin set references the member, with resolved logo and
    /// visible roster.
    pub async fn get_bands_for_admin(&self, member_id: &MemberId) -> ServiceResult<Vec<Band>> {
        let query = Query::new(queries::BANDS_FOR_ADMIN)
            .projection(queries::BAND_DIRECTORY_PROJECTION)
            .param("kind", document::KIND_BAND)
            .param("admin", member_id.as_str());
        let docs = self.store.query(&query).await?;
        docs.into_iter().map(decode).collect()
    }

    /// Visible members of a band, ordered by name.
    pub async fn get_band_roster(&self, band_id: &BandId) -> ServiceResult<Vec<Member>> {
        let query = Query::new(queries::MEMBERS_OF_BAND)
            .param("kind", document::KIND_MEMBER)
            .param("band", band_id.as_str())
            .order(queries::ORDER_NAME_ASC);
        let docs = self.store.query(&query).await?;
        docs.into_iter().map(decode).collect()
    }

    /// Create or update a member document.
    ///
    /// Supplied fields shallow-overwrite the stored document. A new
    /// portrait replaces the old one; the superseded asset is deleted once
    /// the new document references its replacement.
    pub async fn upsert_member(
        &self,
        input: MemberUpsert,
        band: Option<&BandId>,
        portrait: Option<(Bytes, AssetMeta)>,
    ) -> ServiceResult<Member> {
        let old = match &input.id {
            Some(id) => self.store.get_by_id(id.as_str()).await?,
            None => None,
        };
        if old.is_none() && input.name.is_none() {
            return Err(ServiceError::InvalidInput(
                "a new member requires a name".to_string(),
            ));
        }

        let uploaded = match portrait {
            Some((data, meta)) => Some(self.store.upload_asset(AssetKind::Image, data, meta).await?),
            None => None,
        };

        let mut doc = Map::new();
        doc.insert(
            "kind".to_string(),
            Value::from(document::KIND_MEMBER),
        );
        doc.insert("visible".to_string(), Value::Bool(true));
        if let Some(Value::Object(old_fields)) = &old {
            for (key, value) in old_fields {
                doc.insert(key.clone(), value.clone());
            }
        }
        if let Some(id) = &input.id {
            doc.insert("id".to_string(), Value::from(id.as_str()));
        }
        if let Some(name) = &input.name {
            doc.insert("name".to_string(), Value::from(name.as_str()));
        }
        if !input.email.is_empty() {
            doc.insert("email".to_string(), json!(input.email));
        }
        if !input.phone.is_empty() {
            doc.insert("phone".to_string(), json!(input.phone));
        }
        if let Some(instrument) = &input.instrument {
            doc.insert("instrument".to_string(), Value::from(instrument.as_str()));
        }
        if let Some(subgroup) = &input.subgroup {
            doc.insert("subgroup".to_string(), Value::from(subgroup.as_str()));
        }
        if let Some(visible) = input.visible {
            doc.insert("visible".to_string(), Value::Bool(visible));
        }
        if let Some(band) = band {
            doc.insert("band".to_string(), Value::from(band.as_str()));
        }
        if let Some(asset) = &uploaded {
            doc.insert("portrait".to_string(), Value::from(asset.id.as_str()));
        }

        let result = if doc.contains_key("id") {
            self.store.replace(Value::Object(doc)).await?
        } else {
            self.store
                .create(document::KIND_MEMBER, Value::Object(doc))
                .await?
        };

        // Clean up: drop the superseded portrait asset once the document
        // references the new one.
        if uploaded.is_some() {
            if let Some(previous) = old
                .as_ref()
                .and_then(|doc| doc.get("portrait"))
                .and_then(Value::as_str)
            {
                self.store.delete(previous).await?;
                tracing::debug!(asset = previous, "superseded portrait deleted");
            }
        }

        decode(result)
    }
}
