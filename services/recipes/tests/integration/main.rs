mod catalog_test;
mod helpers;
mod membership_test;
mod router_test;
mod shopping_list_test;
mod subscription_test;
