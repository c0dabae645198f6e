// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-inventory
//!
//! Valid instances of every built-in resource type with fixed ids, plus
//! helpers for temporary stores.

#![allow(dead_code)]

use std::net::IpAddr;
use std::sync::Arc;

use tempfile::TempDir;

use cim_inventory::domain::IpAddressWithCidr;
use cim_inventory::{
    default_factory, BaseResource, Credentials, Datacenter, IPAddressPool, Lab, Labels,
    NamedResource, Rack, Resource, ResourceFactory, ResourceStore, Role, Server, StoreConfig,
    Switch, User, VCenter, VLANPool, ESX, VM,
};

pub const LAB_ID: &str = "10000001";
pub const SERVER_ID: &str = "0100000010";
pub const ESX_ID: &str = "0100000011";
pub const VCENTER_ID: &str = "0100000012";

pub fn ip(raw: &str) -> IpAddr {
    raw.parse().expect("Invalid IP in test fixture")
}

/// Store rooted in a fresh temporary directory
///
/// The directory lives as long as the returned guard.
pub async fn temp_store(factory: ResourceFactory) -> (TempDir, ResourceStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = ResourceStore::new(StoreConfig::new(dir.path()), factory)
        .expect("Invalid store config");
    cim_inventory::Store::initialize(&store)
        .await
        .expect("Failed to initialize store");
    (dir, store)
}

pub async fn default_store() -> (TempDir, ResourceStore) {
    temp_store(default_factory()).await
}

pub fn lab_fixture() -> Lab {
    Lab {
        named: NamedResource::new(
            BaseResource::with_id(LAB_ID, "Lab", Labels::new().with("owner", "shravya")),
            "Lab1",
        ),
    }
}

pub fn lab_owned_by(owner: &str) -> Lab {
    Lab::new(format!("{owner}'s lab"), Labels::new().with("owner", owner))
}

pub fn vlan_fixture() -> VLANPool {
    VLANPool::new(100, 199, Labels::new().with("owner", "nandini"))
}

pub fn datacenter_fixture() -> Datacenter {
    Datacenter::new("dc-sjc", "170 West Tasman Dr, San Jose", Labels::new())
}

pub fn rack_fixture() -> Rack {
    Rack::new("rack-a1", "A", Labels::new().with("datacenter", "dc-sjc"))
}

pub fn server_fixture() -> Server {
    let mut server = Server::new(
        "srv-01",
        "FCH2233V0AB",
        ip("10.1.0.10"),
        "UCSC-C220-M5",
        Labels::new(),
    );
    server.named.base.id = SERVER_ID.to_string();
    server
}

pub fn esx_fixture() -> ESX {
    let mut esx = ESX::new("esx-01", SERVER_ID, ip("10.1.0.11"), Labels::new());
    esx.named.base.id = ESX_ID.to_string();
    esx
}

pub fn vcenter_fixture() -> VCenter {
    let mut vcenter = VCenter::new("vc-01", ip("10.1.0.12"), Labels::new());
    vcenter.named.base.id = VCENTER_ID.to_string();
    vcenter
}

pub fn vm_fixture() -> VM {
    VM::new("vm-01", ESX_ID, ip("10.1.0.100"), Labels::new()).managed_by(VCENTER_ID)
}

pub fn switch_fixture() -> Switch {
    Switch::new("sw-01", ip("10.1.0.2"), "FDO1234X5YZ", "N9K-C93180", 48, Labels::new())
}

pub fn ip_pool_fixture() -> IPAddressPool {
    IPAddressPool::new(
        vec![
            IpAddressWithCidr::new("10.1.0.0/24").expect("Invalid subnet in test fixture"),
            IpAddressWithCidr::new("2001:db8::/64").expect("Invalid subnet in test fixture"),
        ],
        Labels::new(),
    )
}

pub fn user_fixture() -> User {
    User::new("alice", Role::new("admin").with_privilege("write"), Labels::new())
        .with_password_hash("$2b$10$abcdefghijklmnopqrstuv")
}

pub fn credentials_fixture() -> Credentials {
    let mut credentials = Credentials::new("switch-admin", Labels::new());
    credentials.add_key("password", "hunter2");
    credentials
}

/// One valid resource of every built-in type
pub fn every_type() -> Vec<Arc<dyn Resource>> {
    vec![
        Arc::new(datacenter_fixture()),
        Arc::new(lab_fixture()),
        Arc::new(rack_fixture()),
        Arc::new(server_fixture()),
        Arc::new(esx_fixture()),
        Arc::new(vcenter_fixture()),
        Arc::new(vm_fixture()),
        Arc::new(switch_fixture()),
        Arc::new(vlan_fixture()),
        Arc::new(ip_pool_fixture()),
        Arc::new(user_fixture()),
        Arc::new(credentials_fixture()),
    ]
}
