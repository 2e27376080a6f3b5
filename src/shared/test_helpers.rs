//! In-memory doubles for every repository, plus auth fixtures for route tests.
//!
//! A unit of work copies the tables when it begins and writes them back only on
//! `commit`, so a dropped unit of work leaves the store untouched.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use chrono::Utc;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::accommodations::models::{
    Accommodation, AccommodationType, NewAccommodation, NewRoom, Room,
};
use crate::features::accommodations::repositories::{
    AccommodationRepository, AccommodationTypeRepository, AccommodationUnitOfWork,
};
use crate::features::activities::models::Activity;
use crate::features::activities::repositories::ActivityRepository;
use crate::features::auth::model::{
    AuthenticatedUser, UserAccount, UserDetailsClaim, UserRole, UserStatus,
};
use crate::features::auth::repositories::UserRepository;
use crate::features::locations::models::{
    Location, LocationAttraction, NewLocation, NewLocationAttraction,
};
use crate::features::locations::repositories::{
    AttractionRepository, AttractionUnitOfWork, LocationRepository, LocationUnitOfWork,
};
use crate::features::provinces::models::Province;
use crate::features::provinces::repositories::ProvinceRepository;
use crate::features::public_users::models::{NewPublicUser, PublicUser, PublicUserUpdate};
use crate::features::public_users::repositories::{PublicUserRepository, PublicUserUnitOfWork};
use crate::features::vendors::models::{NewVendor, Vendor};
use crate::features::vendors::repositories::{
    VendorRepository, VendorUnitOfWork, VendorWithAccount,
};
use crate::shared::constants::{ADMIN_CLIENT_ID, PUBLIC_USER_CLIENT_ID, VENDOR_CLIENT_ID};
use crate::shared::password::hash_password;
use crate::shared::visibility::VisibilityStatus;

const PNG_BYTES: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone)]
struct StoredPicture {
    id: i64,
    owner_id: i64,
    image: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    next_id: i64,
    provinces: Vec<Province>,
    activities: Vec<(Activity, Option<Vec<u8>>)>,
    locations: Vec<Location>,
    location_pictures: Vec<StoredPicture>,
    activity_links: Vec<(i64, i64)>,
    attractions: Vec<LocationAttraction>,
    attraction_pictures: Vec<StoredPicture>,
    accounts: Vec<UserAccount>,
    public_users: Vec<PublicUser>,
    vendors: Vec<Vendor>,
    accommodation_types: Vec<AccommodationType>,
    accommodations: Vec<Accommodation>,
    accommodation_pictures: Vec<StoredPicture>,
    rooms: Vec<Room>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn add_picture(&mut self, owner_id: i64, image: &[u8], kind: PictureKind) -> i64 {
        let id = self.next_id();
        let picture = StoredPicture {
            id,
            owner_id,
            image: image.to_vec(),
        };
        match kind {
            PictureKind::Location => self.location_pictures.push(picture),
            PictureKind::Attraction => self.attraction_pictures.push(picture),
            PictureKind::Accommodation => self.accommodation_pictures.push(picture),
        }
        id
    }

    fn add_account(
        &mut self,
        username: &str,
        password_hash: &str,
        role: UserRole,
        status: UserStatus,
    ) -> Result<UserAccount> {
        if self.accounts.iter().any(|a| a.username == username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        let now = Utc::now();
        let account = UserAccount {
            id: self.next_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role,
            status,
            created_at: now,
            updated_at: now,
        };
        self.accounts.push(account.clone());
        Ok(account)
    }

    fn vendor_with_account(&self, vendor: &Vendor) -> Option<VendorWithAccount> {
        self.accounts
            .iter()
            .find(|a| a.id == vendor.account_id)
            .map(|account| VendorWithAccount {
                vendor: vendor.clone(),
                username: account.username.clone(),
                status: account.status,
            })
    }
}

#[derive(Clone, Copy)]
enum PictureKind {
    Location,
    Attraction,
    Accommodation,
}

fn picture_ids(pictures: &[StoredPicture], owner_id: i64) -> Vec<i64> {
    pictures
        .iter()
        .filter(|p| p.owner_id == owner_id)
        .map(|p| p.id)
        .collect()
}

fn picture_bytes(pictures: &[StoredPicture], id: i64) -> Option<Vec<u8>> {
    pictures.iter().find(|p| p.id == id).map(|p| p.image.clone())
}

fn name_matches(name: &str, text: Option<&str>) -> bool {
    text.map(|t| name.to_lowercase().contains(&t.to_lowercase()))
        .unwrap_or(true)
}

/// Shared in-memory database implementing every repository trait
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        f(&self.tables.lock().unwrap())
    }

    fn write<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        f(&mut self.tables.lock().unwrap())
    }

    fn unit_of_work(&self) -> InMemoryUnitOfWork {
        InMemoryUnitOfWork {
            store: self.clone(),
            tables: self.read(Clone::clone),
        }
    }

    pub fn seed_province(&self, name: &str) -> Province {
        self.write(|t| {
            let now = Utc::now();
            let province = Province {
                id: t.next_id(),
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            };
            t.provinces.push(province.clone());
            province
        })
    }

    /// Seeds an activity whose image is a PNG header
    pub fn seed_activity(&self, name: &str, status: VisibilityStatus) -> Activity {
        self.write(|t| {
            let now = Utc::now();
            let activity = Activity {
                id: t.next_id(),
                activity_name: name.to_string(),
                visibility_status: status,
                created_at: now,
                updated_at: now,
            };
            t.activities
                .push((activity.clone(), Some(PNG_BYTES.to_vec())));
            activity
        })
    }

    pub fn activity_image(&self, id: i64) -> Option<Vec<u8>> {
        self.read(|t| {
            t.activities
                .iter()
                .find(|(a, _)| a.id == id)
                .and_then(|(_, image)| image.clone())
        })
    }

    pub fn activity_count(&self) -> usize {
        self.read(|t| t.activities.len())
    }

    pub fn seed_location(&self, name: &str, province_id: i64) -> Location {
        self.write(|t| {
            let now = Utc::now();
            let location = Location {
                id: t.next_id(),
                name: name.to_string(),
                latitude: 7.2906,
                longitude: 80.6337,
                description: String::new(),
                minimum_spending_days: 1,
                visibility_status: VisibilityStatus::Visible,
                province_id,
                created_at: now,
                updated_at: now,
            };
            t.locations.push(location.clone());
            location
        })
    }

    pub fn location_count(&self) -> usize {
        self.read(|t| t.locations.len())
    }

    pub fn location_picture_count(&self) -> usize {
        self.read(|t| t.location_pictures.len())
    }

    pub fn activity_link_count(&self) -> usize {
        self.read(|t| t.activity_links.len())
    }

    pub fn seed_attraction(&self, name: &str, location_id: i64) -> LocationAttraction {
        self.write(|t| {
            let now = Utc::now();
            let attraction = LocationAttraction {
                id: t.next_id(),
                name: name.to_string(),
                description: String::new(),
                telephone: None,
                email: None,
                website: None,
                visibility_status: VisibilityStatus::Visible,
                location_id,
                created_at: now,
                updated_at: now,
            };
            t.attractions.push(attraction.clone());
            attraction
        })
    }

    pub fn attraction_count(&self) -> usize {
        self.read(|t| t.attractions.len())
    }

    pub fn attraction_picture_count(&self) -> usize {
        self.read(|t| t.attraction_pictures.len())
    }

    /// Seeds an account with an argon2 hash of `password`
    pub fn seed_account(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
        status: UserStatus,
    ) -> UserAccount {
        let password_hash = hash_password(password).unwrap();
        self.write(|t| t.add_account(username, &password_hash, role, status))
            .unwrap()
    }

    pub fn account_by_username(&self, username: &str) -> Option<UserAccount> {
        self.read(|t| t.accounts.iter().find(|a| a.username == username).cloned())
    }

    pub fn account_count(&self) -> usize {
        self.read(|t| t.accounts.len())
    }

    /// Seeds a public user whose username is their email
    pub fn seed_public_user(&self, email: &str, status: UserStatus) -> UserAccount {
        let account = self.seed_account(email, "public-pass", UserRole::PublicUser, status);
        self.write(|t| {
            let now = Utc::now();
            let profile = PublicUser {
                id: t.next_id(),
                account_id: account.id,
                first_name: "Amara".to_string(),
                last_name: "Silva".to_string(),
                email: email.to_string(),
                mobile: None,
                birthday: None,
                gender: None,
                nationality: None,
                country: None,
                address: None,
                town: None,
                zipcode: None,
                verification_code: None,
                verification_expires_at: None,
                created_at: now,
                updated_at: now,
            };
            t.public_users.push(profile);
        });
        account
    }

    /// Seeds an ACTIVE vendor account with password "vendor-pass"
    pub fn seed_vendor(&self, username: &str) -> Vendor {
        let account = self.seed_account(username, "vendor-pass", UserRole::Vendor, UserStatus::Active);
        self.write(|t| {
            let now = Utc::now();
            let vendor = Vendor {
                id: t.next_id(),
                account_id: account.id,
                business_name: format!("{} stays", username),
                email: format!("{}@example.com", username),
                telephone: None,
                address: None,
                created_at: now,
                updated_at: now,
            };
            t.vendors.push(vendor.clone());
            vendor
        })
    }

    pub fn seed_accommodation_type(&self, name: &str) -> AccommodationType {
        self.write(|t| {
            let now = Utc::now();
            let accommodation_type = AccommodationType {
                id: t.next_id(),
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            };
            t.accommodation_types.push(accommodation_type.clone());
            accommodation_type
        })
    }

    pub fn accommodation_count(&self) -> usize {
        self.read(|t| t.accommodations.len())
    }

    pub fn room_count(&self) -> usize {
        self.read(|t| t.rooms.len())
    }
}

// =============================================================================
// Provinces and activities
// =============================================================================

#[async_trait]
impl ProvinceRepository for InMemoryStore {
    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        Ok(self.read(|t| t.provinces.iter().any(|p| p.name == name)))
    }

    async fn insert(&self, name: &str) -> Result<Province> {
        if self.read(|t| t.provinces.iter().any(|p| p.name == name)) {
            return Err(AppError::Conflict(
                "There is an existing province for given name!".to_string(),
            ));
        }
        Ok(self.seed_province(name))
    }

    async fn find_all(&self) -> Result<Vec<Province>> {
        let mut provinces = self.read(|t| t.provinces.clone());
        provinces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(provinces)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Province>> {
        Ok(self.read(|t| t.provinces.iter().find(|p| p.id == id).cloned()))
    }
}

#[async_trait]
impl ActivityRepository for InMemoryStore {
    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        Ok(self.read(|t| t.activities.iter().any(|(a, _)| a.activity_name == name)))
    }

    async fn insert(&self, name: &str, image: Option<&[u8]>) -> Result<Activity> {
        self.write(|t| {
            if t.activities.iter().any(|(a, _)| a.activity_name == name) {
                return Err(AppError::Conflict(
                    "There is an existing activity for given name!".to_string(),
                ));
            }
            let now = Utc::now();
            let activity = Activity {
                id: t.next_id(),
                activity_name: name.to_string(),
                visibility_status: VisibilityStatus::Visible,
                created_at: now,
                updated_at: now,
            };
            t.activities
                .push((activity.clone(), image.map(|bytes| bytes.to_vec())));
            Ok(activity)
        })
    }

    async fn find_all(&self) -> Result<Vec<Activity>> {
        let mut activities: Vec<Activity> =
            self.read(|t| t.activities.iter().map(|(a, _)| a.clone()).collect());
        activities.sort_by(|a, b| a.activity_name.cmp(&b.activity_name));
        Ok(activities)
    }

    async fn find_by_visibility(&self, status: VisibilityStatus) -> Result<Vec<Activity>> {
        let mut activities: Vec<Activity> = self.read(|t| {
            t.activities
                .iter()
                .filter(|(a, _)| a.visibility_status == status)
                .map(|(a, _)| a.clone())
                .collect()
        });
        activities.sort_by(|a, b| a.activity_name.cmp(&b.activity_name));
        Ok(activities)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Activity>> {
        Ok(self.read(|t| {
            t.activities
                .iter()
                .find(|(a, _)| a.id == id)
                .map(|(a, _)| a.clone())
        }))
    }

    async fn toggle_visibility(&self, id: i64) -> Result<Option<VisibilityStatus>> {
        Ok(self.write(|t| {
            t.activities.iter_mut().find(|(a, _)| a.id == id).map(|(a, _)| {
                a.visibility_status = a.visibility_status.toggled();
                a.visibility_status
            })
        }))
    }

    async fn find_image(&self, id: i64) -> Result<Option<Vec<u8>>> {
        Ok(self.activity_image(id))
    }
}

// =============================================================================
// Locations and attractions
// =============================================================================

#[async_trait]
impl LocationRepository for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn LocationUnitOfWork>> {
        Ok(Box::new(self.unit_of_work()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>> {
        Ok(self.read(|t| t.locations.iter().find(|l| l.id == id).cloned()))
    }

    async fn find_all(&self, name_filter: Option<&str>) -> Result<Vec<Location>> {
        let mut locations: Vec<Location> = self.read(|t| {
            t.locations
                .iter()
                .filter(|l| name_matches(&l.name, name_filter))
                .cloned()
                .collect()
        });
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(locations)
    }

    async fn toggle_visibility(&self, id: i64) -> Result<Option<VisibilityStatus>> {
        Ok(self.write(|t| {
            t.locations.iter_mut().find(|l| l.id == id).map(|l| {
                l.visibility_status = l.visibility_status.toggled();
                l.visibility_status
            })
        }))
    }

    async fn find_picture_ids(&self, location_id: i64) -> Result<Vec<i64>> {
        Ok(self.read(|t| picture_ids(&t.location_pictures, location_id)))
    }

    async fn find_picture(&self, picture_id: i64) -> Result<Option<Vec<u8>>> {
        Ok(self.read(|t| picture_bytes(&t.location_pictures, picture_id)))
    }

    async fn count_activities(&self, location_id: i64) -> Result<i64> {
        Ok(self.read(|t| {
            t.activity_links
                .iter()
                .filter(|(l, _)| *l == location_id)
                .count() as i64
        }))
    }

    async fn find_linked_activity_ids(&self, location_id: i64) -> Result<Vec<i64>> {
        Ok(self.read(|t| {
            t.activity_links
                .iter()
                .filter(|(l, _)| *l == location_id)
                .map(|(_, a)| *a)
                .collect()
        }))
    }
}

#[async_trait]
impl AttractionRepository for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn AttractionUnitOfWork>> {
        Ok(Box::new(self.unit_of_work()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LocationAttraction>> {
        Ok(self.read(|t| t.attractions.iter().find(|a| a.id == id).cloned()))
    }

    async fn find_by_location(&self, location_id: i64) -> Result<Vec<LocationAttraction>> {
        let mut attractions: Vec<LocationAttraction> = self.read(|t| {
            t.attractions
                .iter()
                .filter(|a| a.location_id == location_id)
                .cloned()
                .collect()
        });
        attractions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(attractions)
    }

    async fn search_by_name(&self, text: Option<&str>) -> Result<Vec<LocationAttraction>> {
        let mut attractions: Vec<LocationAttraction> = self.read(|t| {
            t.attractions
                .iter()
                .filter(|a| name_matches(&a.name, text))
                .cloned()
                .collect()
        });
        attractions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(attractions)
    }

    async fn count_by_location(&self, location_id: i64) -> Result<i64> {
        Ok(self.read(|t| {
            t.attractions
                .iter()
                .filter(|a| a.location_id == location_id)
                .count() as i64
        }))
    }

    async fn toggle_visibility(&self, id: i64) -> Result<Option<VisibilityStatus>> {
        Ok(self.write(|t| {
            t.attractions.iter_mut().find(|a| a.id == id).map(|a| {
                a.visibility_status = a.visibility_status.toggled();
                a.visibility_status
            })
        }))
    }

    async fn find_picture_ids(&self, attraction_id: i64) -> Result<Vec<i64>> {
        Ok(self.read(|t| picture_ids(&t.attraction_pictures, attraction_id)))
    }

    async fn find_picture(&self, picture_id: i64) -> Result<Option<Vec<u8>>> {
        Ok(self.read(|t| picture_bytes(&t.attraction_pictures, picture_id)))
    }
}

// =============================================================================
// Accounts, public users and vendors
// =============================================================================

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        Ok(self.account_by_username(username))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserAccount>> {
        Ok(self.read(|t| t.accounts.iter().find(|a| a.id == id).cloned()))
    }

    async fn insert_account(
        &self,
        username: &str,
        password_hash: &str,
        role: UserRole,
        status: UserStatus,
    ) -> Result<UserAccount> {
        self.write(|t| t.add_account(username, password_hash, role, status))
    }

    async fn find_user_details(&self, account: &UserAccount) -> Result<Option<UserDetailsClaim>> {
        Ok(self.read(|t| match account.role {
            UserRole::PublicUser => t
                .public_users
                .iter()
                .find(|p| p.account_id == account.id)
                .map(|p| UserDetailsClaim {
                    first_name: Some(p.first_name.clone()),
                    last_name: Some(p.last_name.clone()),
                    email: Some(p.email.clone()),
                }),
            UserRole::Vendor => t
                .vendors
                .iter()
                .find(|v| v.account_id == account.id)
                .map(|v| UserDetailsClaim {
                    first_name: None,
                    last_name: None,
                    email: Some(v.email.clone()),
                }),
            UserRole::Admin => None,
        }))
    }
}

#[async_trait]
impl PublicUserRepository for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn PublicUserUnitOfWork>> {
        Ok(Box::new(self.unit_of_work()))
    }

    async fn find_by_account_id(&self, account_id: i64) -> Result<Option<PublicUser>> {
        Ok(self.read(|t| {
            t.public_users
                .iter()
                .find(|p| p.account_id == account_id)
                .cloned()
        }))
    }

    async fn update_details(
        &self,
        account_id: i64,
        update: &PublicUserUpdate,
    ) -> Result<Option<PublicUser>> {
        Ok(self.write(|t| {
            t.public_users
                .iter_mut()
                .find(|p| p.account_id == account_id)
                .map(|p| {
                    p.first_name = update.first_name.clone();
                    p.last_name = update.last_name.clone();
                    p.mobile = update.mobile.clone();
                    p.birthday = update.birthday;
                    p.gender = update.gender;
                    p.nationality = update.nationality.clone();
                    p.country = update.country.clone();
                    p.address = update.address.clone();
                    p.town = update.town.clone();
                    p.zipcode = update.zipcode.clone();
                    p.updated_at = Utc::now();
                    p.clone()
                })
        }))
    }
}

#[async_trait]
impl VendorRepository for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn VendorUnitOfWork>> {
        Ok(Box::new(self.unit_of_work()))
    }

    async fn find_all(&self) -> Result<Vec<VendorWithAccount>> {
        let mut vendors: Vec<VendorWithAccount> = self.read(|t| {
            t.vendors
                .iter()
                .filter_map(|v| t.vendor_with_account(v))
                .collect()
        });
        vendors.sort_by(|a, b| a.vendor.business_name.cmp(&b.vendor.business_name));
        Ok(vendors)
    }

    async fn find_by_account_id(&self, account_id: i64) -> Result<Option<VendorWithAccount>> {
        Ok(self.read(|t| {
            t.vendors
                .iter()
                .find(|v| v.account_id == account_id)
                .and_then(|v| t.vendor_with_account(v))
        }))
    }
}

// =============================================================================
// Accommodations
// =============================================================================

#[async_trait]
impl AccommodationTypeRepository for InMemoryStore {
    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        Ok(self.read(|t| t.accommodation_types.iter().any(|a| a.name == name)))
    }

    async fn insert(&self, name: &str) -> Result<AccommodationType> {
        if self.read(|t| t.accommodation_types.iter().any(|a| a.name == name)) {
            return Err(AppError::Conflict(
                "There is an existing accommodation type for given name!".to_string(),
            ));
        }
        Ok(self.seed_accommodation_type(name))
    }

    async fn find_all(&self) -> Result<Vec<AccommodationType>> {
        let mut types = self.read(|t| t.accommodation_types.clone());
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }
}

#[async_trait]
impl AccommodationRepository for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn AccommodationUnitOfWork>> {
        Ok(Box::new(self.unit_of_work()))
    }

    async fn find_all(&self) -> Result<Vec<Accommodation>> {
        let mut accommodations = self.read(|t| t.accommodations.clone());
        accommodations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accommodations)
    }

    async fn find_by_vendor(&self, vendor_id: i64) -> Result<Vec<Accommodation>> {
        let mut accommodations: Vec<Accommodation> = self.read(|t| {
            t.accommodations
                .iter()
                .filter(|a| a.vendor_id == vendor_id)
                .cloned()
                .collect()
        });
        accommodations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accommodations)
    }

    async fn find_for_vendor(&self, id: i64, vendor_id: i64) -> Result<Option<Accommodation>> {
        Ok(self.read(|t| {
            t.accommodations
                .iter()
                .find(|a| a.id == id && a.vendor_id == vendor_id)
                .cloned()
        }))
    }

    async fn toggle_status_for_vendor(
        &self,
        id: i64,
        vendor_id: i64,
    ) -> Result<Option<VisibilityStatus>> {
        Ok(self.write(|t| {
            t.accommodations
                .iter_mut()
                .find(|a| a.id == id && a.vendor_id == vendor_id)
                .map(|a| {
                    a.status = a.status.toggled();
                    a.status
                })
        }))
    }

    async fn find_picture_ids(&self, accommodation_id: i64) -> Result<Vec<i64>> {
        Ok(self.read(|t| picture_ids(&t.accommodation_pictures, accommodation_id)))
    }

    async fn find_picture(&self, picture_id: i64) -> Result<Option<Vec<u8>>> {
        Ok(self.read(|t| picture_bytes(&t.accommodation_pictures, picture_id)))
    }

    async fn room_exists_by_name(&self, accommodation_id: i64, name: &str) -> Result<bool> {
        Ok(self.read(|t| {
            t.rooms
                .iter()
                .any(|r| r.accommodation_id == accommodation_id && r.name == name)
        }))
    }

    async fn insert_room(&self, room: &NewRoom) -> Result<Room> {
        self.write(|t| {
            if t.rooms
                .iter()
                .any(|r| r.accommodation_id == room.accommodation_id && r.name == room.name)
            {
                return Err(AppError::Conflict(
                    "There is an existing room for given name!".to_string(),
                ));
            }
            let now = Utc::now();
            let created = Room {
                id: t.next_id(),
                accommodation_id: room.accommodation_id,
                name: room.name.clone(),
                description: room.description.clone(),
                max_occupancy: room.max_occupancy,
                room_count: room.room_count,
                price_per_night: room.price_per_night,
                status: VisibilityStatus::Visible,
                created_at: now,
                updated_at: now,
            };
            t.rooms.push(created.clone());
            Ok(created)
        })
    }

    async fn find_rooms(&self, accommodation_id: i64) -> Result<Vec<Room>> {
        let mut rooms: Vec<Room> = self.read(|t| {
            t.rooms
                .iter()
                .filter(|r| r.accommodation_id == accommodation_id)
                .cloned()
                .collect()
        });
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rooms)
    }

    async fn count_rooms(&self, accommodation_id: i64) -> Result<i64> {
        Ok(self.read(|t| {
            t.rooms
                .iter()
                .filter(|r| r.accommodation_id == accommodation_id)
                .count() as i64
        }))
    }
}

// =============================================================================
// Unit of work
// =============================================================================

/// Works on a private copy of the tables until commit
pub struct InMemoryUnitOfWork {
    store: InMemoryStore,
    tables: Tables,
}

impl InMemoryUnitOfWork {
    fn publish(self) {
        *self.store.tables.lock().unwrap() = self.tables;
    }

    fn has_location(&self, location_id: i64) -> bool {
        self.tables.locations.iter().any(|l| l.id == location_id)
    }

    fn username_in_use(&self, username: &str) -> bool {
        self.tables.accounts.iter().any(|a| a.username == username)
    }
}

#[async_trait]
impl LocationUnitOfWork for InMemoryUnitOfWork {
    async fn location_name_taken(&mut self, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        Ok(self
            .tables
            .locations
            .iter()
            .any(|l| l.name == name && Some(l.id) != exclude_id))
    }

    async fn lock_location(&mut self, id: i64) -> Result<bool> {
        Ok(self.has_location(id))
    }

    async fn province_exists(&mut self, province_id: i64) -> Result<bool> {
        Ok(self.tables.provinces.iter().any(|p| p.id == province_id))
    }

    async fn activity_exists(&mut self, activity_id: i64) -> Result<bool> {
        Ok(self.tables.activities.iter().any(|(a, _)| a.id == activity_id))
    }

    async fn insert_location(&mut self, location: &NewLocation) -> Result<Location> {
        let now = Utc::now();
        let created = Location {
            id: self.tables.next_id(),
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            description: location.description.clone(),
            minimum_spending_days: location.minimum_spending_days,
            visibility_status: VisibilityStatus::Visible,
            province_id: location.province_id,
            created_at: now,
            updated_at: now,
        };
        self.tables.locations.push(created.clone());
        Ok(created)
    }

    async fn update_location(&mut self, id: i64, location: &NewLocation) -> Result<Location> {
        let existing = self
            .tables
            .locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::NotFound("Location not found".to_string()))?;
        existing.name = location.name.clone();
        existing.latitude = location.latitude;
        existing.longitude = location.longitude;
        existing.description = location.description.clone();
        existing.minimum_spending_days = location.minimum_spending_days;
        existing.province_id = location.province_id;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn insert_picture(&mut self, location_id: i64, image: &[u8]) -> Result<i64> {
        Ok(self
            .tables
            .add_picture(location_id, image, PictureKind::Location))
    }

    async fn link_activity(&mut self, location_id: i64, activity_id: i64) -> Result<()> {
        if !self.tables.activity_links.contains(&(location_id, activity_id)) {
            self.tables.activity_links.push((location_id, activity_id));
        }
        Ok(())
    }

    async fn unlink_activities(&mut self, location_id: i64) -> Result<()> {
        self.tables.activity_links.retain(|(l, _)| *l != location_id);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.publish();
        Ok(())
    }
}

#[async_trait]
impl AttractionUnitOfWork for InMemoryUnitOfWork {
    async fn attraction_name_taken(
        &mut self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        Ok(self
            .tables
            .attractions
            .iter()
            .any(|a| a.name == name && Some(a.id) != exclude_id))
    }

    async fn lock_attraction(&mut self, id: i64) -> Result<bool> {
        Ok(self.tables.attractions.iter().any(|a| a.id == id))
    }

    async fn location_exists(&mut self, location_id: i64) -> Result<bool> {
        Ok(self.has_location(location_id))
    }

    async fn insert_attraction(
        &mut self,
        attraction: &NewLocationAttraction,
    ) -> Result<LocationAttraction> {
        let now = Utc::now();
        let created = LocationAttraction {
            id: self.tables.next_id(),
            name: attraction.name.clone(),
            description: attraction.description.clone(),
            telephone: attraction.telephone.clone(),
            email: attraction.email.clone(),
            website: attraction.website.clone(),
            visibility_status: VisibilityStatus::Visible,
            location_id: attraction.location_id,
            created_at: now,
            updated_at: now,
        };
        self.tables.attractions.push(created.clone());
        Ok(created)
    }

    async fn update_attraction(
        &mut self,
        id: i64,
        attraction: &NewLocationAttraction,
    ) -> Result<LocationAttraction> {
        let existing = self
            .tables
            .attractions
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound("Location attraction not found".to_string()))?;
        existing.name = attraction.name.clone();
        existing.description = attraction.description.clone();
        existing.telephone = attraction.telephone.clone();
        existing.email = attraction.email.clone();
        existing.website = attraction.website.clone();
        existing.location_id = attraction.location_id;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn insert_picture(&mut self, attraction_id: i64, image: &[u8]) -> Result<i64> {
        Ok(self
            .tables
            .add_picture(attraction_id, image, PictureKind::Attraction))
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.publish();
        Ok(())
    }
}

#[async_trait]
impl PublicUserUnitOfWork for InMemoryUnitOfWork {
    async fn username_taken(&mut self, username: &str) -> Result<bool> {
        Ok(self.username_in_use(username))
    }

    async fn email_taken(&mut self, email: &str) -> Result<bool> {
        let email = email.to_lowercase();
        Ok(self
            .tables
            .public_users
            .iter()
            .any(|p| p.email.to_lowercase() == email))
    }

    async fn insert_account(
        &mut self,
        username: &str,
        password_hash: &str,
        role: UserRole,
        status: UserStatus,
    ) -> Result<UserAccount> {
        self.tables.add_account(username, password_hash, role, status)
    }

    async fn insert_profile(&mut self, profile: &NewPublicUser) -> Result<PublicUser> {
        let now = Utc::now();
        let created = PublicUser {
            id: self.tables.next_id(),
            account_id: profile.account_id,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            mobile: profile.mobile.clone(),
            birthday: None,
            gender: None,
            nationality: None,
            country: None,
            address: None,
            town: None,
            zipcode: None,
            verification_code: Some(profile.verification_code.clone()),
            verification_expires_at: Some(profile.verification_expires_at),
            created_at: now,
            updated_at: now,
        };
        self.tables.public_users.push(created.clone());
        Ok(created)
    }

    async fn lock_by_email(&mut self, email: &str) -> Result<Option<PublicUser>> {
        let email = email.to_lowercase();
        Ok(self
            .tables
            .public_users
            .iter()
            .find(|p| p.email.to_lowercase() == email)
            .cloned())
    }

    async fn set_account_status(&mut self, account_id: i64, status: UserStatus) -> Result<()> {
        if let Some(account) = self.tables.accounts.iter_mut().find(|a| a.id == account_id) {
            account.status = status;
        }
        Ok(())
    }

    async fn clear_verification(&mut self, public_user_id: i64) -> Result<()> {
        if let Some(profile) = self
            .tables
            .public_users
            .iter_mut()
            .find(|p| p.id == public_user_id)
        {
            profile.verification_code = None;
            profile.verification_expires_at = None;
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.publish();
        Ok(())
    }
}

#[async_trait]
impl VendorUnitOfWork for InMemoryUnitOfWork {
    async fn username_taken(&mut self, username: &str) -> Result<bool> {
        Ok(self.username_in_use(username))
    }

    async fn insert_account(
        &mut self,
        username: &str,
        password_hash: &str,
        role: UserRole,
        status: UserStatus,
    ) -> Result<UserAccount> {
        self.tables.add_account(username, password_hash, role, status)
    }

    async fn insert_vendor(&mut self, vendor: &NewVendor) -> Result<Vendor> {
        let now = Utc::now();
        let created = Vendor {
            id: self.tables.next_id(),
            account_id: vendor.account_id,
            business_name: vendor.business_name.clone(),
            email: vendor.email.clone(),
            telephone: vendor.telephone.clone(),
            address: vendor.address.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.vendors.push(created.clone());
        Ok(created)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.publish();
        Ok(())
    }
}

#[async_trait]
impl AccommodationUnitOfWork for InMemoryUnitOfWork {
    async fn accommodation_type_exists(&mut self, type_id: i64) -> Result<bool> {
        Ok(self
            .tables
            .accommodation_types
            .iter()
            .any(|a| a.id == type_id))
    }

    async fn location_exists(&mut self, location_id: i64) -> Result<bool> {
        Ok(self.has_location(location_id))
    }

    async fn insert_accommodation(
        &mut self,
        accommodation: &NewAccommodation,
    ) -> Result<Accommodation> {
        let now = Utc::now();
        let a = accommodation.clone();
        let created = Accommodation {
            id: self.tables.next_id(),
            name: a.name,
            description: a.description,
            telephone: a.telephone,
            email: a.email,
            address_line1: a.address_line1,
            address_line2: a.address_line2,
            city: a.city,
            province: a.province,
            postal_code: a.postal_code,
            latitude: a.latitude,
            longitude: a.longitude,
            check_in_time: a.check_in_time,
            check_out_time: a.check_out_time,
            parking: a.parking,
            smoking: a.smoking,
            pets: a.pets,
            rating: 0.0,
            rating_count: 0,
            status: VisibilityStatus::Visible,
            location_id: a.location_id,
            vendor_id: a.vendor_id,
            accommodation_type_id: a.accommodation_type_id,
            created_at: now,
            updated_at: now,
        };
        self.tables.accommodations.push(created.clone());
        Ok(created)
    }

    async fn insert_picture(&mut self, accommodation_id: i64, image: &[u8]) -> Result<i64> {
        Ok(self
            .tables
            .add_picture(accommodation_id, image, PictureKind::Accommodation))
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.publish();
        Ok(())
    }
}

// =============================================================================
// Auth fixtures
// =============================================================================

/// Auth settings with a fixed signing key, empty client secrets and no leeway
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        signing_key: "test-signing-key-0123456789abcdef".to_string(),
        jwt_leeway: Duration::ZERO,
        admin_client_secret: String::new(),
        public_user_client_secret: String::new(),
        vendor_client_secret: String::new(),
        bootstrap_admin: None,
        verification_code_ttl: Duration::from_secs(900),
    }
}

pub fn authenticated_user(user_id: i64, role: UserRole) -> AuthenticatedUser {
    let client_id = match role {
        UserRole::Admin => ADMIN_CLIENT_ID,
        UserRole::Vendor => VENDOR_CLIENT_ID,
        UserRole::PublicUser => PUBLIC_USER_CLIENT_ID,
    };

    AuthenticatedUser {
        user_id,
        username: format!("user-{}", user_id),
        client_id: client_id.to_string(),
        role,
        authorities: vec![role.authority().to_string()],
        scopes: vec!["read".to_string(), "write".to_string(), "trust".to_string()],
    }
}

/// Wrap a router so every request carries `user`, as the auth middleware would
pub fn with_auth(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}
