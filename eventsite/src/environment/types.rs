use eventsite_core_contact_impl::ContactServiceImpl;
use eventsite_core_health_impl::HealthServiceImpl;
use eventsite_email_impl::EmailServiceImpl;

pub type Email = EmailServiceImpl;

// Core
pub type Health = HealthServiceImpl<Email>;
pub type Contact = ContactServiceImpl<Email>;

// API
pub type RestServer = eventsite_api_rest::RestServer<Health, Contact>;
