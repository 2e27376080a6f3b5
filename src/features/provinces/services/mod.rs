mod province_service;

pub use province_service::ProvinceService;
