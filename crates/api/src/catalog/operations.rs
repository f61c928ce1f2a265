use crate::app::dto::{
    AddressResponse, ContactResponse, CreateAddressRequest, CreateContactRequest, LoginUserRequest,
    RegisterUserRequest, UpdateAddressRequest, UpdateContactRequest, UpdateUserRequest, UserResponse,
};

use super::{BEARER, Catalog, CatalogError, Endpoint, HttpMethod, Operation, Payload, QueryParam};

const USERS: &str = "Users";
const CONTACTS: &str = "Contacts";
const ADDRESSES: &str = "Addresses";

const CONTACT_ID: &str = "contactId";
const ADDRESS_ID: &str = "addressId";

/// Operations reachable without a session.
pub fn register_guest_operations(catalog: &mut Catalog) -> Result<(), CatalogError> {
    catalog.register(
        Operation::new("register-user", HttpMethod::Post, "/api/users", Endpoint::RegisterUser)
            .summary("Register a new user")
            .description("Create a new user account with username and password")
            .tag(USERS)
            .body::<RegisterUserRequest>()
            .returns(Payload::object::<UserResponse>()),
    )?;
    catalog.register(
        Operation::new("login-user", HttpMethod::Post, "/api/users/_login", Endpoint::LoginUser)
            .summary("Login user")
            .description("Authenticate user and receive a bearer token")
            .tag(USERS)
            .body::<LoginUserRequest>()
            .returns(Payload::object::<UserResponse>()),
    )?;
    Ok(())
}

/// Operations that require a bearer token.
pub fn register_authenticated_operations(catalog: &mut Catalog) -> Result<(), CatalogError> {
    register_user_operations(catalog)?;
    register_contact_operations(catalog)?;
    register_address_operations(catalog)
}

fn secured(id: &'static str, method: HttpMethod, path: &'static str, endpoint: Endpoint) -> Operation {
    Operation::new(id, method, path, endpoint).secured(BEARER)
}

fn register_user_operations(catalog: &mut Catalog) -> Result<(), CatalogError> {
    catalog.register(
        secured("logout-user", HttpMethod::Delete, "/api/users", Endpoint::LogoutUser)
            .summary("Logout current user")
            .description("Invalidate the current user's authentication token")
            .tag(USERS)
            .returns(Payload::Flag),
    )?;
    catalog.register(
        secured(
            "update-current-user",
            HttpMethod::Patch,
            "/api/users/_current",
            Endpoint::UpdateCurrentUser,
        )
        .summary("Update current user")
        .description("Update the authenticated user's profile information")
        .tag(USERS)
        .body::<UpdateUserRequest>()
        .returns(Payload::object::<UserResponse>()),
    )?;
    catalog.register(
        secured("get-current-user", HttpMethod::Get, "/api/users/_current", Endpoint::CurrentUser)
            .summary("Get current user")
            .description("Retrieve the authenticated user's profile information")
            .tag(USERS)
            .returns(Payload::object::<UserResponse>()),
    )?;
    Ok(())
}

fn register_contact_operations(catalog: &mut Catalog) -> Result<(), CatalogError> {
    catalog.register(
        secured("list-contacts", HttpMethod::Get, "/api/contacts", Endpoint::ListContacts)
            .summary("List contacts with search")
            .description("Search and filter contacts with pagination support")
            .tag(CONTACTS)
            .query(QueryParam::string("name", "Filter by first or last name"))
            .query(QueryParam::string("email", "Filter by email"))
            .query(QueryParam::string("phone", "Filter by phone"))
            .query(QueryParam::integer("page", "Page number", 1))
            .query(QueryParam::integer("size", "Page size", 10))
            .returns(Payload::paged::<ContactResponse>()),
    )?;
    catalog.register(
        secured("create-contact", HttpMethod::Post, "/api/contacts", Endpoint::CreateContact)
            .summary("Create a new contact")
            .description("Add a new contact to the authenticated user's contact list")
            .tag(CONTACTS)
            .body::<CreateContactRequest>()
            .returns(Payload::object::<ContactResponse>()),
    )?;
    catalog.register(
        secured(
            "update-contact",
            HttpMethod::Put,
            "/api/contacts/{contactId}",
            Endpoint::UpdateContact,
        )
        .summary("Update a contact")
        .description("Update an existing contact's information")
        .tag(CONTACTS)
        .path_param(CONTACT_ID, "Contact ID")
        .body::<UpdateContactRequest>()
        .returns(Payload::object::<ContactResponse>()),
    )?;
    catalog.register(
        secured("get-contact", HttpMethod::Get, "/api/contacts/{contactId}", Endpoint::GetContact)
            .summary("Get a contact by ID")
            .description("Retrieve detailed information about a specific contact")
            .tag(CONTACTS)
            .path_param(CONTACT_ID, "Contact ID")
            .returns(Payload::object::<ContactResponse>()),
    )?;
    catalog.register(
        secured(
            "delete-contact",
            HttpMethod::Delete,
            "/api/contacts/{contactId}",
            Endpoint::DeleteContact,
        )
        .summary("Delete a contact")
        .description("Remove a contact from the authenticated user's contact list")
        .tag(CONTACTS)
        .path_param(CONTACT_ID, "Contact ID")
        .returns(Payload::Flag),
    )?;
    Ok(())
}

fn register_address_operations(catalog: &mut Catalog) -> Result<(), CatalogError> {
    const COLLECTION: &str = "/api/contacts/{contactId}/addresses";
    const ITEM: &str = "/api/contacts/{contactId}/addresses/{addressId}";

    catalog.register(
        secured("list-addresses", HttpMethod::Get, COLLECTION, Endpoint::ListAddresses)
            .summary("List addresses for a contact")
            .description("Retrieve all addresses associated with a specific contact")
            .tag(ADDRESSES)
            .path_param(CONTACT_ID, "Contact ID")
            .returns(Payload::list::<AddressResponse>()),
    )?;
    catalog.register(
        secured("create-address", HttpMethod::Post, COLLECTION, Endpoint::CreateAddress)
            .summary("Create a new address")
            .description("Add a new address to a contact")
            .tag(ADDRESSES)
            .path_param(CONTACT_ID, "Contact ID")
            .body::<CreateAddressRequest>()
            .returns(Payload::object::<AddressResponse>()),
    )?;
    catalog.register(
        secured("update-address", HttpMethod::Put, ITEM, Endpoint::UpdateAddress)
            .summary("Update an address")
            .description("Update an existing address for a contact")
            .tag(ADDRESSES)
            .path_param(CONTACT_ID, "Contact ID")
            .path_param(ADDRESS_ID, "Address ID")
            .body::<UpdateAddressRequest>()
            .returns(Payload::object::<AddressResponse>()),
    )?;
    catalog.register(
        secured("get-address", HttpMethod::Get, ITEM, Endpoint::GetAddress)
            .summary("Get an address by ID")
            .description("Retrieve detailed information about a specific address")
            .tag(ADDRESSES)
            .path_param(CONTACT_ID, "Contact ID")
            .path_param(ADDRESS_ID, "Address ID")
            .returns(Payload::object::<AddressResponse>()),
    )?;
    catalog.register(
        secured("delete-address", HttpMethod::Delete, ITEM, Endpoint::DeleteAddress)
            .summary("Delete an address")
            .description("Remove an address from a contact")
            .tag(ADDRESSES)
            .path_param(CONTACT_ID, "Contact ID")
            .path_param(ADDRESS_ID, "Address ID")
            .returns(Payload::Flag),
    )?;
    Ok(())
}
