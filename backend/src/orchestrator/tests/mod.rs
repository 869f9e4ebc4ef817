mod test_dispatch_order;
