use actix_web::{http::header, web, HttpResponse};

use crate::domain::customer::{
    CustomerError, CustomerId, CustomerRegistrationRequest, CustomerService, CustomerUpdateRequest,
};
use crate::metrics::Metrics;

use super::CUSTOMERS_PATH;

pub async fn list_customers(
    service: web::Data<CustomerService>,
    metrics: web::Data<Metrics>,
) -> Result<HttpResponse, CustomerError> {
    let customers = metrics.observe("list", service.list_customers()).await?;
    Ok(HttpResponse::Ok().json(customers))
}

pub async fn get_customer(
    service: web::Data<CustomerService>,
    metrics: web::Data<Metrics>,
    path: web::Path<CustomerId>,
) -> Result<HttpResponse, CustomerError> {
    let customer = metrics
        .observe("get", service.get_customer(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(customer))
}

pub async fn register_customer(
    service: web::Data<CustomerService>,
    metrics: web::Data<Metrics>,
    body: web::Json<CustomerRegistrationRequest>,
) -> Result<HttpResponse, CustomerError> {
    let customer = metrics
        .observe("register", service.register_customer(body.into_inner()))
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{}/{}", CUSTOMERS_PATH, customer.id)))
        .json(customer))
}

pub async fn delete_customer(
    service: web::Data<CustomerService>,
    metrics: web::Data<Metrics>,
    path: web::Path<CustomerId>,
) -> Result<HttpResponse, CustomerError> {
    metrics
        .observe("delete", service.delete_customer(path.into_inner()))
        .await?;
    Ok(HttpResponse::Accepted().finish())
}

pub async fn update_customer(
    service: web::Data<CustomerService>,
    metrics: web::Data<Metrics>,
    path: web::Path<CustomerId>,
    body: web::Json<CustomerUpdateRequest>,
) -> Result<HttpResponse, CustomerError> {
    let customer = metrics
        .observe(
            "update",
            service.update_customer(path.into_inner(), body.into_inner()),
        )
        .await?;
    Ok(HttpResponse::Accepted().json(customer))
}
